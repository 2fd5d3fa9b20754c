pub mod account;
pub mod food_item;
pub mod otp;
pub mod restaurant;
pub mod table;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a path segment as an id, mapping failure to a validation error so
/// the uniform envelope is preserved.
pub(crate) fn parse_id(value: &str, what: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| ApiError::Validation(format!("invalid {what} id")))
}
