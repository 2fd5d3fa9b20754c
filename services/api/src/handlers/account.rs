use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use dinetap_auth_types::extract::MaybeAuthorization;
use dinetap_auth_types::token::verify_bearer;
use dinetap_core::envelope::{ok, ok_message};
use dinetap_domain::role::Role;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::account::{
    CreateAccountInput, CreateAccountOutcome, CreateAccountUseCase, DeleteAccountUseCase,
    GetAccountUseCase, SignInInput, SignInOutcome, SignInUseCase, UpdateAccountInput,
    UpdateAccountUseCase,
};

fn parse_role(role: &str) -> Result<Role, ApiError> {
    Role::from_str(role).ok_or_else(|| ApiError::Validation(format!("unknown role {role}")))
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(serialize_with = "dinetap_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "dinetap_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::Account> for AccountResponse {
    fn from(account: crate::domain::types::Account) -> Self {
        Self {
            id: account.id.to_string(),
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            phone: account.phone,
            role: account.role,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

// ── POST /accounts/{role} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: Option<String>,
    pub verification_code: Option<String>,
    pub otp: Option<String>,
}

#[derive(Serialize)]
pub struct CreateAccountResponse {
    pub account: AccountResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub async fn create_account(
    State(state): State<AppState>,
    Path(role): Path<String>,
    auth: MaybeAuthorization,
    Json(body): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = parse_role(&role)?;
    // The header is optional here (superadmin bootstrap carries a
    // verification code instead), but when present it must verify.
    let actor = match auth.as_deref() {
        Some(header) => Some(verify_bearer(Some(header), &state.role_secrets)?),
        None => None,
    };

    let usecase = CreateAccountUseCase {
        accounts: state.account_repo(),
        gate: state.otp_gate(),
        secrets: state.role_secrets.clone(),
        verification_code: state.verification_code.clone(),
    };
    let outcome = usecase
        .execute(
            actor,
            CreateAccountInput {
                role,
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                phone: body.phone,
                password: body.password,
                verification_code: body.verification_code,
                otp: body.otp,
            },
        )
        .await?;

    match outcome {
        CreateAccountOutcome::OtpSent => Ok((
            StatusCode::OK,
            ok_message("OTP sent to your email. Please verify."),
        )),
        CreateAccountOutcome::Created { account, token } => Ok((
            StatusCode::CREATED,
            ok(CreateAccountResponse {
                account: account.into(),
                token: token.map(|t| format!("Bearer {t}")),
            }),
        )),
    }
}

// ── POST /accounts/{role}/signin ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub otp: Option<String>,
    pub password: Option<String>,
}

pub async fn sign_in(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(body): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = parse_role(&role)?;
    let usecase = SignInUseCase {
        accounts: state.account_repo(),
        gate: state.otp_gate(),
        secrets: state.role_secrets.clone(),
    };
    let outcome = usecase
        .execute(SignInInput {
            role,
            email: body.email,
            otp: body.otp,
            password: body.password,
        })
        .await?;

    match outcome {
        SignInOutcome::OtpSent => Ok((
            StatusCode::OK,
            ok_message("OTP sent to the registered email address"),
        )),
        SignInOutcome::SignedIn { token } => Ok((
            StatusCode::OK,
            ok(serde_json::json!({ "token": format!("Bearer {token}") })),
        )),
    }
}

// ── GET /accounts/{role} ─────────────────────────────────────────────────────

pub async fn get_account(
    State(state): State<AppState>,
    Path(role): Path<String>,
    auth: MaybeAuthorization,
) -> Result<impl IntoResponse, ApiError> {
    let role = parse_role(&role)?;
    let identity = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(identity, role).await?;
    Ok(ok(AccountResponse::from(account)))
}

// ── PUT /accounts/{role} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_account(
    State(state): State<AppState>,
    Path(role): Path<String>,
    auth: MaybeAuthorization,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = parse_role(&role)?;
    let identity = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = UpdateAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(
            identity,
            role,
            UpdateAccountInput {
                first_name: body.first_name,
                last_name: body.last_name,
                phone: body.phone,
            },
        )
        .await?;
    Ok(ok(AccountResponse::from(account)))
}

// ── DELETE /accounts/{role} ──────────────────────────────────────────────────

pub async fn delete_account(
    State(state): State<AppState>,
    Path(role): Path<String>,
    auth: MaybeAuthorization,
) -> Result<impl IntoResponse, ApiError> {
    let role = parse_role(&role)?;
    let identity = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = DeleteAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(identity, role).await?;
    Ok(ok_message("account deleted"))
}
