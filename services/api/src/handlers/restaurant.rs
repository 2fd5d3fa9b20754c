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

use crate::domain::repository::RestaurantChanges;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::state::AppState;
use crate::usecase::restaurant::{
    CreateRestaurantInput, CreateRestaurantOutcome, CreateRestaurantUseCase,
    DeleteRestaurantUseCase, GetRestaurantUseCase, ListRestaurantsUseCase, UpdateRestaurantInput,
    UpdateRestaurantUseCase,
};

#[derive(Serialize)]
pub struct RestaurantResponse {
    pub id: String,
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: i32,
    pub gstin: Option<String>,
    pub restrict: bool,
    pub owner_id: String,
    #[serde(serialize_with = "dinetap_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "dinetap_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::Restaurant> for RestaurantResponse {
    fn from(restaurant: crate::domain::types::Restaurant) -> Self {
        Self {
            id: restaurant.id.to_string(),
            name: restaurant.name,
            address1: restaurant.address1,
            address2: restaurant.address2,
            city: restaurant.city,
            state: restaurant.state,
            pincode: restaurant.pincode,
            gstin: restaurant.gstin,
            restrict: restaurant.restrict,
            owner_id: restaurant.owner_id.to_string(),
            created_at: restaurant.created_at,
            updated_at: restaurant.updated_at,
        }
    }
}

// ── POST /restaurants ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRestaurantRequest {
    pub owner_email: String,
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: i32,
    pub gstin: Option<String>,
    pub otp: Option<String>,
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    auth: MaybeAuthorization,
    Json(body): Json<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = CreateRestaurantUseCase {
        accounts: state.account_repo(),
        restaurants: state.restaurant_repo(),
        gate: state.otp_gate(),
    };
    let outcome = usecase
        .execute(
            actor,
            CreateRestaurantInput {
                owner_email: body.owner_email,
                name: body.name,
                address1: body.address1,
                address2: body.address2,
                city: body.city,
                state: body.state,
                pincode: body.pincode,
                gstin: body.gstin,
                otp: body.otp,
            },
        )
        .await?;

    match outcome {
        CreateRestaurantOutcome::OtpSent => Ok((
            StatusCode::OK,
            ok_message("OTP sent to the owner's email. Please verify."),
        )),
        CreateRestaurantOutcome::Created(restaurant) => Ok((
            StatusCode::CREATED,
            ok(RestaurantResponse::from(restaurant)),
        )),
    }
}

// ── GET /restaurants ─────────────────────────────────────────────────────────

pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ListRestaurantsUseCase {
        restaurants: state.restaurant_repo(),
    };
    let restaurants = usecase.execute().await?;
    let data: Vec<RestaurantResponse> = restaurants.into_iter().map(Into::into).collect();
    Ok(ok(data))
}

// ── GET /restaurants/{id} ────────────────────────────────────────────────────

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let usecase = GetRestaurantUseCase {
        restaurants: state.restaurant_repo(),
    };
    let restaurant = usecase.execute(restaurant_id).await?;
    Ok(ok(RestaurantResponse::from(restaurant)))
}

// ── PUT /restaurants/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<i32>,
    pub gstin: Option<String>,
    pub restrict: Option<bool>,
    pub manager_email: Option<String>,
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: MaybeAuthorization,
    Json(body): Json<UpdateRestaurantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let actor = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = UpdateRestaurantUseCase {
        accounts: state.account_repo(),
        restaurants: state.restaurant_repo(),
    };
    let restaurant = usecase
        .execute(
            actor,
            restaurant_id,
            UpdateRestaurantInput {
                changes: RestaurantChanges {
                    name: body.name,
                    address1: body.address1,
                    address2: body.address2,
                    city: body.city,
                    state: body.state,
                    pincode: body.pincode,
                    gstin: body.gstin,
                    restrict: body.restrict,
                },
                manager_email: body.manager_email,
            },
        )
        .await?;
    Ok(ok(RestaurantResponse::from(restaurant)))
}

// ── DELETE /restaurants/{id} ─────────────────────────────────────────────────

pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: MaybeAuthorization,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let actor = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = DeleteRestaurantUseCase {
        restaurants: state.restaurant_repo(),
    };
    let name = usecase.execute(actor, restaurant_id).await?;
    Ok(ok_message(&format!("{name} is deleted")))
}
