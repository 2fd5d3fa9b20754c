use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use dinetap_core::envelope::ok_message;

use crate::domain::types::validate_email;
use crate::error::ApiError;
use crate::state::AppState;

// ── POST /otp/generate ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateOtpRequest {
    pub email: String,
}

pub async fn generate_otp(
    State(state): State<AppState>,
    Json(body): Json<GenerateOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !validate_email(&body.email) {
        return Err(ApiError::Validation("invalid email".into()));
    }
    state.otp_gate().issue(&body.email).await?;
    Ok(ok_message("OTP sent successfully"))
}

// ── POST /otp/verify ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !validate_email(&body.email) {
        return Err(ApiError::Validation("invalid email".into()));
    }
    state.otp_gate().verify(&body.email, &body.otp).await?;
    Ok(ok_message("OTP verified successfully"))
}
