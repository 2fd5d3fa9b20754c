use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use dinetap_auth_types::token::TokenError;

/// API service error variants.
///
/// Every variant renders the uniform `{"success": false, "message": ...}`
/// envelope with the status carrying the outcome category.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("missing or malformed authorization header")]
    MissingAuthorization,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid verification code")]
    InvalidVerificationCode,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("no one-time code found for this email")]
    OtpNotFound,
    #[error("one-time code expired")]
    OtpExpired,
    #[error("invalid one-time code")]
    OtpInvalid,
    #[error("server configuration error")]
    Configuration(&'static str),
    #[error("{0}")]
    Upstream(String),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::MissingAuthorization => "MISSING_AUTHORIZATION",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpInvalid => "OTP_INVALID",
            Self::Configuration(_) => "CONFIGURATION",
            Self::Upstream(_) => "UPSTREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingOrMalformed => Self::MissingAuthorization,
            TokenError::InvalidOrExpired => Self::InvalidToken,
            TokenError::NoSecretForRole => Self::Configuration("no signing secret for role"),
            TokenError::Signing => Self::Configuration("token signing failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::OtpExpired | Self::OtpInvalid => StatusCode::BAD_REQUEST,
            Self::MissingAuthorization
            | Self::InvalidToken
            | Self::Unauthorized
            | Self::InvalidVerificationCode
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) | Self::OtpNotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Configuration(_) | Self::Upstream(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; logging them here
        // would be noise. Internal errors need the anyhow chain logged so the
        // root cause is traceable; the client sees a fixed message.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::Configuration(what) => {
                tracing::error!(what, kind = "CONFIGURATION", "configuration error");
            }
            Self::Upstream(msg) => {
                tracing::error!(error = %msg, kind = "UPSTREAM", "upstream dependency failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
