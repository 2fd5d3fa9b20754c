#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Account, DiningTable, FoodItem, OneTimeCode, Restaurant};
use crate::error::ApiError;

/// Repository for account records. Reads return soft-deleted rows as-is;
/// liveness checks belong to the usecases so the delete operation itself can
/// still see the row.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError>;
    async fn create(&self, account: &Account) -> Result<(), ApiError>;
    /// Update profile fields; `None` leaves a field unchanged.
    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), ApiError>;
    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Field changes for a restaurant update; `None` leaves a field unchanged.
#[derive(Debug, Default, Clone)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<i32>,
    pub gstin: Option<String>,
    pub restrict: Option<bool>,
}

impl RestaurantChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address1.is_none()
            && self.address2.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.pincode.is_none()
            && self.gstin.is_none()
            && self.restrict.is_none()
    }
}

pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ApiError>;
    async fn list_active(&self) -> Result<Vec<Restaurant>, ApiError>;
    async fn create(&self, restaurant: &Restaurant) -> Result<(), ApiError>;
    async fn update_fields(&self, id: Uuid, changes: &RestaurantChanges) -> Result<(), ApiError>;
    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError>;
    /// Account ids listed as managers of the restaurant.
    async fn managers(&self, restaurant_id: Uuid) -> Result<Vec<Uuid>, ApiError>;
    /// Add an account to the manager set. Adding an existing member is a
    /// no-op (single conditional insert, safe under concurrency).
    async fn add_manager(&self, restaurant_id: Uuid, account_id: Uuid) -> Result<(), ApiError>;
}

/// Field changes for a food-item update; `None` leaves a field unchanged.
#[derive(Debug, Default, Clone)]
pub struct FoodItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub enabled: Option<bool>,
    pub veg: Option<bool>,
    pub category: Option<dinetap_domain::category::FoodCategory>,
}

impl FoodItemChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.enabled.is_none()
            && self.veg.is_none()
            && self.category.is_none()
    }
}

pub trait FoodItemRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FoodItem>, ApiError>;
    /// Enabled, non-deleted items of a restaurant.
    async fn list_active_for_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<FoodItem>, ApiError>;
    /// Non-deleted item with this exact title in the restaurant, if any.
    /// Backs the (title, restaurant) uniqueness check.
    async fn find_active_by_title(
        &self,
        restaurant_id: Uuid,
        title: &str,
    ) -> Result<Option<FoodItem>, ApiError>;
    async fn create(&self, item: &FoodItem) -> Result<(), ApiError>;
    async fn update_fields(&self, id: Uuid, changes: &FoodItemChanges) -> Result<(), ApiError>;
    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError>;
}

pub trait TableRepository: Send + Sync {
    /// Delete every table of the restaurant and insert `tables` in one
    /// transaction, so a re-run or crash never leaves a partial set.
    async fn replace_for_restaurant(
        &self,
        restaurant_id: Uuid,
        tables: &[DiningTable],
    ) -> Result<(), ApiError>;
    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
        table_number: Option<i32>,
    ) -> Result<Vec<DiningTable>, ApiError>;
}

pub trait OtpRepository: Send + Sync {
    async fn create(&self, code: &OneTimeCode) -> Result<(), ApiError>;
    /// Most recently created record for this email.
    async fn find_latest(&self, email: &str) -> Result<Option<OneTimeCode>, ApiError>;
    /// Remove every record for this email (single-use verification policy).
    async fn delete_for_email(&self, email: &str) -> Result<(), ApiError>;
}

/// Outbound mail port. Fire-and-forget: a failure surfaces as an upstream
/// error to the caller, no retries.
pub trait MailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError>;
}

/// Produces the scannable payload encoded into a table's QR code.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, restaurant_id: Uuid, table_number: i32) -> String;
}
