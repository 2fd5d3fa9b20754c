//! Multi-secret bearer-token issuance and verification.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use dinetap_domain::role::Role;

/// Bearer-token lifetime in seconds (6 hours).
pub const TOKEN_TTL_SECS: u64 = 6 * 3600;

/// Per-role signing secrets, loaded once at startup and passed explicitly —
/// no environment lookups at request time.
#[derive(Debug, Clone)]
pub struct RoleSecrets {
    pub admin: String,
    pub manager: String,
    pub superadmin: String,
}

impl RoleSecrets {
    /// Signing secret for a role, `None` for roles that never hold tokens.
    pub fn for_role(&self, role: Role) -> Option<&str> {
        match role {
            Role::Admin => Some(&self.admin),
            Role::Manager => Some(&self.manager),
            Role::Superadmin => Some(&self.superadmin),
            Role::User => None,
        }
    }
}

/// Subject identity extracted from a verified bearer token.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub account_id: Uuid,
    pub role: Role,
}

/// Errors returned by [`verify_bearer`] and [`issue_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("missing or malformed authorization header")]
    MissingOrMalformed,
    #[error("invalid or expired token")]
    InvalidOrExpired,
    #[error("no signing secret configured for role")]
    NoSecretForRole,
    #[error("token signing failed")]
    Signing,
}

/// JWT claims payload. The role is deliberately absent: it cannot be spoofed
/// by forging a payload field because it is derived from which role secret
/// verifies the signature.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account ID (UUID string).
    pub sub: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a bearer token for `account_id` with the secret bound to `role`.
pub fn issue_token(
    account_id: Uuid,
    role: Role,
    secrets: &RoleSecrets,
) -> Result<String, TokenError> {
    let secret = secrets.for_role(role).ok_or(TokenError::NoSecretForRole)?;
    let claims = TokenClaims {
        sub: account_id.to_string(),
        exp: now_secs() + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Signing)
}

/// Decode and validate a JWT against one secret.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
fn decode_jwt(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::InvalidOrExpired)?;

    Ok(data.claims)
}

/// Verify a raw `Authorization` header value against every role secret.
///
/// The header must be of the form `Bearer <token>`. All three secrets are
/// tried on every call, so the cost does not reveal which secret (if any)
/// matched; the first match in the fixed order admin → manager → superadmin
/// determines the returned role.
pub fn verify_bearer(
    header: Option<&str>,
    secrets: &RoleSecrets,
) -> Result<Identity, TokenError> {
    let header = header.ok_or(TokenError::MissingOrMalformed)?;
    let token = header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(TokenError::MissingOrMalformed)?;

    // Evaluate every attempt before picking a winner.
    let attempts = [
        (Role::Admin, decode_jwt(token, &secrets.admin)),
        (Role::Manager, decode_jwt(token, &secrets.manager)),
        (Role::Superadmin, decode_jwt(token, &secrets.superadmin)),
    ];

    let mut matched = None;
    for (role, outcome) in attempts {
        if matched.is_none() {
            if let Ok(claims) = outcome {
                matched = Some((role, claims));
            }
        }
    }

    let (role, claims) = matched.ok_or(TokenError::InvalidOrExpired)?;
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::InvalidOrExpired)?;

    Ok(Identity { account_id, role })
}
