//! Bearer-token helpers for tests.
//!
//! Tokens are real HS256 signatures over the fixed [`test_secrets`], so tests
//! exercise the same multi-secret verification path as production.

use http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use dinetap_auth_types::token::{RoleSecrets, issue_token};
use dinetap_domain::role::Role;

/// Fixed role secrets shared by every test in the workspace.
pub fn test_secrets() -> RoleSecrets {
    RoleSecrets {
        admin: "test-admin-secret".to_owned(),
        manager: "test-manager-secret".to_owned(),
        superadmin: "test-superadmin-secret".to_owned(),
    }
}

/// `Bearer <token>` header value for `account_id` acting as `role`.
///
/// Panics for `Role::User`, which has no signing secret.
pub fn bearer_for(account_id: Uuid, role: Role) -> String {
    let token =
        issue_token(account_id, role, &test_secrets()).expect("role must have a signing secret");
    format!("Bearer {token}")
}

/// Header map carrying only the `Authorization` header for `account_id`/`role`.
pub fn auth_headers(account_id: Uuid, role: Role) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&bearer_for(account_id, role)).unwrap(),
    );
    map
}
