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
use dinetap_domain::category::FoodCategory;

use crate::domain::repository::FoodItemChanges;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::state::AppState;
use crate::usecase::food_item::{
    CreateFoodItemInput, CreateFoodItemUseCase, DeleteFoodItemUseCase, GetFoodItemUseCase,
    ListFoodItemsUseCase, UpdateFoodItemUseCase,
};

#[derive(Serialize)]
pub struct FoodItemResponse {
    pub id: String,
    pub restaurant_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub enabled: bool,
    pub veg: bool,
    pub category: FoodCategory,
    #[serde(serialize_with = "dinetap_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "dinetap_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::FoodItem> for FoodItemResponse {
    fn from(item: crate::domain::types::FoodItem) -> Self {
        Self {
            id: item.id.to_string(),
            restaurant_id: item.restaurant_id.to_string(),
            title: item.title,
            description: item.description,
            price: item.price,
            image: item.image,
            enabled: item.enabled,
            veg: item.veg,
            category: item.category,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

// ── POST /restaurants/{id}/fooditems ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateFoodItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub enabled: Option<bool>,
    pub veg: Option<bool>,
    pub category: Option<FoodCategory>,
}

pub async fn create_food_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    auth: MaybeAuthorization,
    Json(body): Json<CreateFoodItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let actor = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = CreateFoodItemUseCase {
        restaurants: state.restaurant_repo(),
        food_items: state.food_item_repo(),
    };
    let item = usecase
        .execute(
            actor,
            restaurant_id,
            CreateFoodItemInput {
                title: body.title,
                description: body.description,
                price: body.price,
                image: body.image,
                enabled: body.enabled,
                veg: body.veg,
                category: body.category,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, ok(FoodItemResponse::from(item))))
}

// ── GET /restaurants/{id}/fooditems ──────────────────────────────────────────

pub async fn list_food_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let usecase = ListFoodItemsUseCase {
        restaurants: state.restaurant_repo(),
        food_items: state.food_item_repo(),
    };
    let items = usecase.execute(restaurant_id).await?;
    let data: Vec<FoodItemResponse> = items.into_iter().map(Into::into).collect();
    Ok(ok(data))
}

// ── GET /restaurants/{id}/fooditems/{item_id} ────────────────────────────────

pub async fn get_food_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let item_id = parse_id(&item_id, "food item")?;
    let usecase = GetFoodItemUseCase {
        restaurants: state.restaurant_repo(),
        food_items: state.food_item_repo(),
    };
    let item = usecase.execute(restaurant_id, item_id).await?;
    Ok(ok(FoodItemResponse::from(item)))
}

// ── PUT /restaurants/{id}/fooditems/{item_id} ────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateFoodItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub enabled: Option<bool>,
    pub veg: Option<bool>,
    pub category: Option<FoodCategory>,
}

pub async fn update_food_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
    auth: MaybeAuthorization,
    Json(body): Json<UpdateFoodItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let item_id = parse_id(&item_id, "food item")?;
    let actor = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = UpdateFoodItemUseCase {
        restaurants: state.restaurant_repo(),
        food_items: state.food_item_repo(),
    };
    let item = usecase
        .execute(
            actor,
            restaurant_id,
            item_id,
            FoodItemChanges {
                title: body.title,
                description: body.description,
                price: body.price,
                image: body.image,
                enabled: body.enabled,
                veg: body.veg,
                category: body.category,
            },
        )
        .await?;
    Ok(ok(FoodItemResponse::from(item)))
}

// ── DELETE /restaurants/{id}/fooditems/{item_id} ─────────────────────────────

pub async fn delete_food_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
    auth: MaybeAuthorization,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant_id = parse_id(&id, "restaurant")?;
    let item_id = parse_id(&item_id, "food item")?;
    let actor = verify_bearer(auth.as_deref(), &state.role_secrets)?;
    let usecase = DeleteFoodItemUseCase {
        restaurants: state.restaurant_repo(),
        food_items: state.food_item_repo(),
    };
    usecase.execute(actor, restaurant_id, item_id).await?;
    Ok(ok_message("food item deleted"))
}
