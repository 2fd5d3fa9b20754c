//! Raw `Authorization` header extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;

/// The raw `Authorization` header value, if any.
///
/// Extraction never rejects: routes decide whether a credential is required,
/// and [`crate::token::verify_bearer`] owns scheme and signature validation.
/// Handlers pass the inner value straight to the verifier.
#[derive(Debug, Clone)]
pub struct MaybeAuthorization(pub Option<String>);

impl MaybeAuthorization {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for MaybeAuthorization
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let value = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        async move { Ok(Self(value)) }
    }
}
