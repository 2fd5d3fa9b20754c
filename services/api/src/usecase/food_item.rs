//! Menu item management.
//!
//! Every mutation resolves the item's restaurant and passes the shared
//! authorization policy; (title, restaurant) stays unique among non-deleted
//! items.

use chrono::Utc;
use uuid::Uuid;

use dinetap_auth_types::token::Identity;
use dinetap_domain::category::FoodCategory;

use crate::auth::policy::authorize_restaurant;
use crate::domain::repository::{FoodItemChanges, FoodItemRepository, RestaurantRepository};
use crate::domain::types::{FoodItem, Restaurant, validate_name};
use crate::error::ApiError;

async fn live_restaurant<R: RestaurantRepository>(
    restaurants: &R,
    restaurant_id: Uuid,
) -> Result<Restaurant, ApiError> {
    restaurants
        .find_by_id(restaurant_id)
        .await?
        .filter(|r| !r.deleted)
        .ok_or(ApiError::NotFound("restaurant"))
}

// ── CreateFoodItem ───────────────────────────────────────────────────────────

pub struct CreateFoodItemInput {
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub enabled: Option<bool>,
    pub veg: Option<bool>,
    pub category: Option<FoodCategory>,
}

pub struct CreateFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub restaurants: R,
    pub food_items: F,
}

impl<R, F> CreateFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub async fn execute(
        &self,
        actor: Identity,
        restaurant_id: Uuid,
        input: CreateFoodItemInput,
    ) -> Result<FoodItem, ApiError> {
        if !validate_name(&input.title) {
            return Err(ApiError::Validation(
                "title must be 2 to 50 characters".into(),
            ));
        }
        if input.price < 1 {
            return Err(ApiError::Validation("price must be positive".into()));
        }

        let restaurant = live_restaurant(&self.restaurants, restaurant_id).await?;
        let managers = self.restaurants.managers(restaurant_id).await?;
        authorize_restaurant(&actor, &restaurant, &managers)?;

        if self
            .food_items
            .find_active_by_title(restaurant_id, &input.title)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(format!(
                "food item already exists for title {}",
                input.title
            )));
        }

        let now = Utc::now();
        let item = FoodItem {
            id: Uuid::new_v4(),
            restaurant_id,
            title: input.title,
            description: input.description,
            price: input.price,
            image: input.image,
            enabled: input.enabled.unwrap_or(true),
            veg: input.veg.unwrap_or(true),
            category: input.category.unwrap_or_default(),
            deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.food_items.create(&item).await?;
        Ok(item)
    }
}

// ── UpdateFoodItem ───────────────────────────────────────────────────────────

pub struct UpdateFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub restaurants: R,
    pub food_items: F,
}

impl<R, F> UpdateFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub async fn execute(
        &self,
        actor: Identity,
        restaurant_id: Uuid,
        item_id: Uuid,
        changes: FoodItemChanges,
    ) -> Result<FoodItem, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::Validation("nothing to update".into()));
        }
        if let Some(ref title) = changes.title {
            if !validate_name(title) {
                return Err(ApiError::Validation(
                    "title must be 2 to 50 characters".into(),
                ));
            }
        }
        if let Some(price) = changes.price {
            if price < 1 {
                return Err(ApiError::Validation("price must be positive".into()));
            }
        }

        let item = self
            .food_items
            .find_by_id(item_id)
            .await?
            .filter(|i| !i.deleted && i.restaurant_id == restaurant_id)
            .ok_or(ApiError::NotFound("food item"))?;
        let restaurant = live_restaurant(&self.restaurants, item.restaurant_id).await?;
        let managers = self.restaurants.managers(restaurant.id).await?;
        authorize_restaurant(&actor, &restaurant, &managers)?;

        // Re-check uniqueness only on a real rename; the item may keep its
        // own title.
        if let Some(ref title) = changes.title {
            if *title != item.title
                && self
                    .food_items
                    .find_active_by_title(restaurant.id, title)
                    .await?
                    .is_some()
            {
                return Err(ApiError::Conflict(format!(
                    "food item already exists for title {title}"
                )));
            }
        }

        self.food_items.update_fields(item_id, &changes).await?;
        self.food_items
            .find_by_id(item_id)
            .await?
            .ok_or(ApiError::NotFound("food item"))
    }
}

// ── GetFoodItem / ListFoodItems ──────────────────────────────────────────────

pub struct GetFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub restaurants: R,
    pub food_items: F,
}

impl<R, F> GetFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub async fn execute(&self, restaurant_id: Uuid, item_id: Uuid) -> Result<FoodItem, ApiError> {
        let item = self
            .food_items
            .find_by_id(item_id)
            .await?
            .filter(|i| !i.deleted && i.restaurant_id == restaurant_id)
            .ok_or(ApiError::NotFound("food item"))?;
        live_restaurant(&self.restaurants, item.restaurant_id).await?;
        Ok(item)
    }
}

pub struct ListFoodItemsUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub restaurants: R,
    pub food_items: F,
}

impl<R, F> ListFoodItemsUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub async fn execute(&self, restaurant_id: Uuid) -> Result<Vec<FoodItem>, ApiError> {
        live_restaurant(&self.restaurants, restaurant_id).await?;
        self.food_items
            .list_active_for_restaurant(restaurant_id)
            .await
    }
}

// ── DeleteFoodItem ───────────────────────────────────────────────────────────

pub struct DeleteFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub restaurants: R,
    pub food_items: F,
}

impl<R, F> DeleteFoodItemUseCase<R, F>
where
    R: RestaurantRepository,
    F: FoodItemRepository,
{
    pub async fn execute(
        &self,
        actor: Identity,
        restaurant_id: Uuid,
        item_id: Uuid,
    ) -> Result<(), ApiError> {
        let item = self
            .food_items
            .find_by_id(item_id)
            .await?
            .filter(|i| !i.deleted && i.restaurant_id == restaurant_id)
            .ok_or(ApiError::NotFound("food item"))?;
        let restaurant = live_restaurant(&self.restaurants, item.restaurant_id).await?;
        let managers = self.restaurants.managers(restaurant.id).await?;
        authorize_restaurant(&actor, &restaurant, &managers)?;

        self.food_items.soft_delete(item_id).await
    }
}
