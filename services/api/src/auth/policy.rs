//! Restaurant-resource authorization policy.
//!
//! One function, consumed identically by every restaurant-scoped mutation
//! (restaurant update/delete, food items, table generation). Superadmins
//! provision accounts and restaurants but do not mutate restaurant resources,
//! so they are denied here like any other non-owning role.

use uuid::Uuid;

use dinetap_auth_types::token::Identity;
use dinetap_domain::role::Role;

use crate::domain::types::Restaurant;
use crate::error::ApiError;

/// Allow iff the subject is the owning admin or a listed manager of
/// `restaurant`. `managers` is the restaurant's manager set.
pub fn authorize_restaurant(
    identity: &Identity,
    restaurant: &Restaurant,
    managers: &[Uuid],
) -> Result<(), ApiError> {
    let allowed = match identity.role {
        Role::Admin => identity.account_id == restaurant.owner_id,
        Role::Manager => managers.contains(&identity.account_id),
        _ => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}
