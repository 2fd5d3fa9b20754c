//! Uniform response envelope.
//!
//! Every endpoint answers `{"success": true, "data": ...}` on success and
//! `{"success": false, "message": "..."}` on failure. Error rendering lives
//! with the service error type; these helpers cover the success half.

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

/// Wrap a serialisable payload in the success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Success envelope carrying a human-readable message instead of a payload
/// (used by two-phase flows, e.g. "OTP sent").
pub fn ok_message(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "data": message }))
}
