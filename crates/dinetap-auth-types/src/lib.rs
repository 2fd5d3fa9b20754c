//! Bearer-token types for the dinetap backend.
//!
//! Each token-bearing role (admin, manager, superadmin) has its own HMAC
//! signing secret; a token's role is inferred from which secret verifies it,
//! never from a claim inside the payload.

pub mod extract;
pub mod token;
