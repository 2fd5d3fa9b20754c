//! Restaurant provisioning and management.

use chrono::Utc;
use uuid::Uuid;

use dinetap_auth_types::token::Identity;
use dinetap_domain::role::Role;

use crate::auth::policy::authorize_restaurant;
use crate::domain::repository::{
    AccountRepository, MailSender, OtpRepository, RestaurantChanges, RestaurantRepository,
};
use crate::domain::types::{Restaurant, validate_email, validate_name, validate_pincode};
use crate::error::ApiError;
use crate::usecase::otp::OtpGate;

// ── CreateRestaurant ─────────────────────────────────────────────────────────

pub struct CreateRestaurantInput {
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

#[derive(Debug)]
pub enum CreateRestaurantOutcome {
    /// First phase done: a code was sent to the owner's email, proving the
    /// named admin consents to owning the restaurant.
    OtpSent,
    Created(Restaurant),
}

pub struct CreateRestaurantUseCase<A, R, O, M>
where
    A: AccountRepository,
    R: RestaurantRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub accounts: A,
    pub restaurants: R,
    pub gate: OtpGate<O, M>,
}

impl<A, R, O, M> CreateRestaurantUseCase<A, R, O, M>
where
    A: AccountRepository,
    R: RestaurantRepository,
    O: OtpRepository,
    M: MailSender,
{
    pub async fn execute(
        &self,
        actor: Identity,
        input: CreateRestaurantInput,
    ) -> Result<CreateRestaurantOutcome, ApiError> {
        if actor.role != Role::Superadmin {
            return Err(ApiError::Unauthorized);
        }
        if !validate_name(&input.name)
            || !validate_name(&input.address1)
            || !validate_name(&input.city)
            || !validate_name(&input.state)
        {
            return Err(ApiError::Validation(
                "name and address fields must be 2 to 50 characters".into(),
            ));
        }
        if !validate_email(&input.owner_email) {
            return Err(ApiError::Validation("invalid owner email".into()));
        }
        if !validate_pincode(input.pincode) {
            return Err(ApiError::Validation("pincode must be six digits".into()));
        }

        let owner = self
            .accounts
            .find_by_email(&input.owner_email)
            .await?
            .filter(|a| !a.deleted && a.role == Role::Admin)
            .ok_or(ApiError::NotFound("owner"))?;

        let Some(ref otp) = input.otp else {
            self.gate.issue(&input.owner_email).await?;
            return Ok(CreateRestaurantOutcome::OtpSent);
        };
        self.gate.verify(&input.owner_email, otp).await?;

        let now = Utc::now();
        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            name: input.name,
            address1: input.address1,
            address2: input.address2,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            gstin: input.gstin,
            restrict: false,
            deleted: false,
            owner_id: owner.id,
            created_at: now,
            updated_at: now,
        };
        self.restaurants.create(&restaurant).await?;
        Ok(CreateRestaurantOutcome::Created(restaurant))
    }
}

// ── UpdateRestaurant ─────────────────────────────────────────────────────────

pub struct UpdateRestaurantInput {
    pub changes: RestaurantChanges,
    /// Adds this account to the manager set (must be a live manager account).
    pub manager_email: Option<String>,
}

pub struct UpdateRestaurantUseCase<A, R>
where
    A: AccountRepository,
    R: RestaurantRepository,
{
    pub accounts: A,
    pub restaurants: R,
}

impl<A, R> UpdateRestaurantUseCase<A, R>
where
    A: AccountRepository,
    R: RestaurantRepository,
{
    pub async fn execute(
        &self,
        actor: Identity,
        restaurant_id: Uuid,
        input: UpdateRestaurantInput,
    ) -> Result<Restaurant, ApiError> {
        if input.changes.is_empty() && input.manager_email.is_none() {
            return Err(ApiError::Validation("nothing to update".into()));
        }
        if let Some(pincode) = input.changes.pincode {
            if !validate_pincode(pincode) {
                return Err(ApiError::Validation("pincode must be six digits".into()));
            }
        }

        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .filter(|r| !r.deleted)
            .ok_or(ApiError::NotFound("restaurant"))?;
        let managers = self.restaurants.managers(restaurant_id).await?;
        authorize_restaurant(&actor, &restaurant, &managers)?;

        if let Some(ref email) = input.manager_email {
            let manager = self
                .accounts
                .find_by_email(email)
                .await?
                .filter(|a| !a.deleted)
                .ok_or(ApiError::NotFound("manager"))?;
            if manager.role != Role::Manager {
                return Err(ApiError::Validation(
                    "account is not a manager account".into(),
                ));
            }
            self.restaurants
                .add_manager(restaurant_id, manager.id)
                .await?;
        }

        if !input.changes.is_empty() {
            self.restaurants
                .update_fields(restaurant_id, &input.changes)
                .await?;
        }

        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or(ApiError::NotFound("restaurant"))
    }
}

// ── GetRestaurant / ListRestaurants ──────────────────────────────────────────

pub struct GetRestaurantUseCase<R: RestaurantRepository> {
    pub restaurants: R,
}

impl<R: RestaurantRepository> GetRestaurantUseCase<R> {
    pub async fn execute(&self, restaurant_id: Uuid) -> Result<Restaurant, ApiError> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .filter(|r| !r.deleted)
            .ok_or(ApiError::NotFound("restaurant"))
    }
}

pub struct ListRestaurantsUseCase<R: RestaurantRepository> {
    pub restaurants: R,
}

impl<R: RestaurantRepository> ListRestaurantsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.restaurants.list_active().await
    }
}

// ── DeleteRestaurant ─────────────────────────────────────────────────────────

pub struct DeleteRestaurantUseCase<R: RestaurantRepository> {
    pub restaurants: R,
}

impl<R: RestaurantRepository> DeleteRestaurantUseCase<R> {
    pub async fn execute(&self, actor: Identity, restaurant_id: Uuid) -> Result<String, ApiError> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .filter(|r| !r.deleted)
            .ok_or(ApiError::NotFound("restaurant"))?;
        let managers = self.restaurants.managers(restaurant_id).await?;
        authorize_restaurant(&actor, &restaurant, &managers)?;

        self.restaurants.soft_delete(restaurant_id).await?;
        Ok(restaurant.name)
    }
}
