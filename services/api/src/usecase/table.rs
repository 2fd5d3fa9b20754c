//! Table/QR provisioning.

use uuid::Uuid;

use dinetap_auth_types::token::Identity;

use crate::auth::policy::authorize_restaurant;
use crate::domain::repository::{QrEncoder, RestaurantRepository, TableRepository};
use crate::domain::types::{DiningTable, MAX_TABLES_PER_RESTAURANT};
use crate::error::ApiError;

// ── GenerateTables ───────────────────────────────────────────────────────────

pub struct GenerateTablesUseCase<R, T, Q>
where
    R: RestaurantRepository,
    T: TableRepository,
    Q: QrEncoder,
{
    pub restaurants: R,
    pub tables: T,
    pub qr: Q,
}

impl<R, T, Q> GenerateTablesUseCase<R, T, Q>
where
    R: RestaurantRepository,
    T: TableRepository,
    Q: QrEncoder,
{
    /// Replace the restaurant's whole table set with tables numbered 1..=N,
    /// each carrying a freshly encoded QR payload. Delete and inserts run in
    /// one transaction, so running this twice with the same N leaves exactly
    /// N rows.
    pub async fn execute(
        &self,
        actor: Identity,
        restaurant_id: Uuid,
        number_of_tables: i32,
    ) -> Result<Vec<DiningTable>, ApiError> {
        if !(1..=MAX_TABLES_PER_RESTAURANT).contains(&number_of_tables) {
            return Err(ApiError::Validation(format!(
                "number_of_tables must be between 1 and {MAX_TABLES_PER_RESTAURANT}"
            )));
        }

        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .filter(|r| !r.deleted)
            .ok_or(ApiError::NotFound("restaurant"))?;
        let managers = self.restaurants.managers(restaurant_id).await?;
        authorize_restaurant(&actor, &restaurant, &managers)?;

        let tables: Vec<DiningTable> = (1..=number_of_tables)
            .map(|table_number| DiningTable {
                id: Uuid::new_v4(),
                restaurant_id,
                table_number,
                qr_code: self.qr.encode(restaurant_id, table_number),
                pin: None,
                pin_expires_at: None,
            })
            .collect();

        self.tables
            .replace_for_restaurant(restaurant_id, &tables)
            .await?;
        Ok(tables)
    }
}

// ── ListTables ───────────────────────────────────────────────────────────────

pub struct ListTablesUseCase<R, T>
where
    R: RestaurantRepository,
    T: TableRepository,
{
    pub restaurants: R,
    pub tables: T,
}

impl<R, T> ListTablesUseCase<R, T>
where
    R: RestaurantRepository,
    T: TableRepository,
{
    pub async fn execute(
        &self,
        restaurant_id: Uuid,
        table_number: Option<i32>,
    ) -> Result<Vec<DiningTable>, ApiError> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .filter(|r| !r.deleted)
            .ok_or(ApiError::NotFound("restaurant"))?;
        self.tables
            .list_for_restaurant(restaurant_id, table_number)
            .await
    }
}
