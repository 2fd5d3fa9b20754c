use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use dinetap_api_schema::{accounts, food_items, one_time_codes, restaurant_managers, restaurants, tables};
use dinetap_domain::category::FoodCategory;
use dinetap_domain::role::Role;

use crate::domain::repository::{
    AccountRepository, FoodItemChanges, FoodItemRepository, OtpRepository, RestaurantChanges,
    RestaurantRepository, TableRepository,
};
use crate::domain::types::{Account, DiningTable, FoodItem, OneTimeCode, Restaurant};
use crate::error::ApiError;

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ApiError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &Account) -> Result<(), ApiError> {
        accounts::ActiveModel {
            id: Set(account.id),
            first_name: Set(account.first_name.clone()),
            last_name: Set(account.last_name.clone()),
            email: Set(account.email.clone()),
            phone: Set(account.phone.clone()),
            role: Set(account.role.as_str().to_owned()),
            password_hash: Set(account.password_hash.clone()),
            deleted: Set(false),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create account")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut model = accounts::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            model.first_name = Set(first_name.to_owned());
        }
        if let Some(last_name) = last_name {
            model.last_name = Set(last_name.to_owned());
        }
        if let Some(phone) = phone {
            model.phone = Set(phone.to_owned());
        }
        model.update(&self.db).await.context("update account")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        accounts::ActiveModel {
            id: Set(id),
            deleted: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("soft-delete account")?;
        Ok(())
    }
}

fn account_from_model(model: accounts::Model) -> Result<Account, ApiError> {
    let role = Role::from_str(&model.role).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown role in accounts row: {}", model.role))
    })?;
    Ok(Account {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        phone: model.phone,
        role,
        password_hash: model.password_hash,
        deleted: model.deleted,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Restaurant repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRestaurantRepository {
    pub db: DatabaseConnection,
}

impl RestaurantRepository for DbRestaurantRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, ApiError> {
        let model = restaurants::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find restaurant by id")?;
        Ok(model.map(restaurant_from_model))
    }

    async fn list_active(&self) -> Result<Vec<Restaurant>, ApiError> {
        let models = restaurants::Entity::find()
            .filter(restaurants::Column::Deleted.eq(false))
            .all(&self.db)
            .await
            .context("list restaurants")?;
        Ok(models.into_iter().map(restaurant_from_model).collect())
    }

    async fn create(&self, restaurant: &Restaurant) -> Result<(), ApiError> {
        restaurants::ActiveModel {
            id: Set(restaurant.id),
            name: Set(restaurant.name.clone()),
            address1: Set(restaurant.address1.clone()),
            address2: Set(restaurant.address2.clone()),
            city: Set(restaurant.city.clone()),
            state: Set(restaurant.state.clone()),
            pincode: Set(restaurant.pincode),
            gstin: Set(restaurant.gstin.clone()),
            restrict: Set(restaurant.restrict),
            deleted: Set(false),
            owner_id: Set(restaurant.owner_id),
            created_at: Set(restaurant.created_at),
            updated_at: Set(restaurant.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create restaurant")?;
        Ok(())
    }

    async fn update_fields(&self, id: Uuid, changes: &RestaurantChanges) -> Result<(), ApiError> {
        let mut model = restaurants::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref name) = changes.name {
            model.name = Set(name.clone());
        }
        if let Some(ref address1) = changes.address1 {
            model.address1 = Set(address1.clone());
        }
        if let Some(ref address2) = changes.address2 {
            model.address2 = Set(Some(address2.clone()));
        }
        if let Some(ref city) = changes.city {
            model.city = Set(city.clone());
        }
        if let Some(ref state) = changes.state {
            model.state = Set(state.clone());
        }
        if let Some(pincode) = changes.pincode {
            model.pincode = Set(pincode);
        }
        if let Some(ref gstin) = changes.gstin {
            model.gstin = Set(Some(gstin.clone()));
        }
        if let Some(restrict) = changes.restrict {
            model.restrict = Set(restrict);
        }
        model.update(&self.db).await.context("update restaurant")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        restaurants::ActiveModel {
            id: Set(id),
            deleted: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("soft-delete restaurant")?;
        Ok(())
    }

    async fn managers(&self, restaurant_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        let rows = restaurant_managers::Entity::find()
            .filter(restaurant_managers::Column::RestaurantId.eq(restaurant_id))
            .all(&self.db)
            .await
            .context("list restaurant managers")?;
        Ok(rows.into_iter().map(|row| row.account_id).collect())
    }

    async fn add_manager(&self, restaurant_id: Uuid, account_id: Uuid) -> Result<(), ApiError> {
        // Conditional insert: a concurrent duplicate addition is a no-op
        // instead of a lost write or an error.
        restaurant_managers::Entity::insert(restaurant_managers::ActiveModel {
            restaurant_id: Set(restaurant_id),
            account_id: Set(account_id),
            added_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                restaurant_managers::Column::RestaurantId,
                restaurant_managers::Column::AccountId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .do_nothing()
        .exec(&self.db)
        .await
        .context("add restaurant manager")?;
        Ok(())
    }
}

fn restaurant_from_model(model: restaurants::Model) -> Restaurant {
    Restaurant {
        id: model.id,
        name: model.name,
        address1: model.address1,
        address2: model.address2,
        city: model.city,
        state: model.state,
        pincode: model.pincode,
        gstin: model.gstin,
        restrict: model.restrict,
        deleted: model.deleted,
        owner_id: model.owner_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── FoodItem repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFoodItemRepository {
    pub db: DatabaseConnection,
}

impl FoodItemRepository for DbFoodItemRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FoodItem>, ApiError> {
        let model = food_items::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find food item by id")?;
        model.map(food_item_from_model).transpose()
    }

    async fn list_active_for_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<FoodItem>, ApiError> {
        let models = food_items::Entity::find()
            .filter(food_items::Column::RestaurantId.eq(restaurant_id))
            .filter(food_items::Column::Deleted.eq(false))
            .filter(food_items::Column::Enabled.eq(true))
            .all(&self.db)
            .await
            .context("list food items")?;
        models.into_iter().map(food_item_from_model).collect()
    }

    async fn find_active_by_title(
        &self,
        restaurant_id: Uuid,
        title: &str,
    ) -> Result<Option<FoodItem>, ApiError> {
        let model = food_items::Entity::find()
            .filter(food_items::Column::RestaurantId.eq(restaurant_id))
            .filter(food_items::Column::Title.eq(title))
            .filter(food_items::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .context("find food item by title")?;
        model.map(food_item_from_model).transpose()
    }

    async fn create(&self, item: &FoodItem) -> Result<(), ApiError> {
        food_items::ActiveModel {
            id: Set(item.id),
            restaurant_id: Set(item.restaurant_id),
            title: Set(item.title.clone()),
            description: Set(item.description.clone()),
            price: Set(item.price),
            image: Set(item.image.clone()),
            enabled: Set(item.enabled),
            veg: Set(item.veg),
            category: Set(item.category.as_str().to_owned()),
            deleted: Set(false),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create food item")?;
        Ok(())
    }

    async fn update_fields(&self, id: Uuid, changes: &FoodItemChanges) -> Result<(), ApiError> {
        let mut model = food_items::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref title) = changes.title {
            model.title = Set(title.clone());
        }
        if let Some(ref description) = changes.description {
            model.description = Set(Some(description.clone()));
        }
        if let Some(price) = changes.price {
            model.price = Set(price);
        }
        if let Some(ref image) = changes.image {
            model.image = Set(Some(image.clone()));
        }
        if let Some(enabled) = changes.enabled {
            model.enabled = Set(enabled);
        }
        if let Some(veg) = changes.veg {
            model.veg = Set(veg);
        }
        if let Some(category) = changes.category {
            model.category = Set(category.as_str().to_owned());
        }
        model.update(&self.db).await.context("update food item")?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        food_items::ActiveModel {
            id: Set(id),
            deleted: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("soft-delete food item")?;
        Ok(())
    }
}

fn food_item_from_model(model: food_items::Model) -> Result<FoodItem, ApiError> {
    let category = FoodCategory::from_str(&model.category).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown category in food_items row: {}",
            model.category
        ))
    })?;
    Ok(FoodItem {
        id: model.id,
        restaurant_id: model.restaurant_id,
        title: model.title,
        description: model.description,
        price: model.price,
        image: model.image,
        enabled: model.enabled,
        veg: model.veg,
        category,
        deleted: model.deleted,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Table repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTableRepository {
    pub db: DatabaseConnection,
}

impl TableRepository for DbTableRepository {
    async fn replace_for_restaurant(
        &self,
        restaurant_id: Uuid,
        new_tables: &[DiningTable],
    ) -> Result<(), ApiError> {
        let models: Vec<tables::ActiveModel> = new_tables.iter().map(table_to_active).collect();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    tables::Entity::delete_many()
                        .filter(tables::Column::RestaurantId.eq(restaurant_id))
                        .exec(txn)
                        .await?;
                    tables::Entity::insert_many(models).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("replace tables for restaurant")?;
        Ok(())
    }

    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
        table_number: Option<i32>,
    ) -> Result<Vec<DiningTable>, ApiError> {
        let mut query = tables::Entity::find()
            .filter(tables::Column::RestaurantId.eq(restaurant_id));
        if let Some(number) = table_number {
            query = query.filter(tables::Column::TableNumber.eq(number));
        }
        let models = query
            .order_by_asc(tables::Column::TableNumber)
            .all(&self.db)
            .await
            .context("list tables")?;
        Ok(models.into_iter().map(table_from_model).collect())
    }
}

fn table_to_active(table: &DiningTable) -> tables::ActiveModel {
    tables::ActiveModel {
        id: Set(table.id),
        restaurant_id: Set(table.restaurant_id),
        table_number: Set(table.table_number),
        qr_code: Set(table.qr_code.clone()),
        pin: Set(table.pin.clone()),
        pin_expires_at: Set(table.pin_expires_at),
    }
}

fn table_from_model(model: tables::Model) -> DiningTable {
    DiningTable {
        id: model.id,
        restaurant_id: model.restaurant_id,
        table_number: model.table_number,
        qr_code: model.qr_code,
        pin: model.pin,
        pin_expires_at: model.pin_expires_at,
    }
}

// ── OneTimeCode repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn create(&self, code: &OneTimeCode) -> Result<(), ApiError> {
        one_time_codes::ActiveModel {
            id: Set(code.id),
            email: Set(code.email.clone()),
            code_hash: Set(code.code_hash.clone()),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("create one-time code")?;
        Ok(())
    }

    async fn find_latest(&self, email: &str) -> Result<Option<OneTimeCode>, ApiError> {
        let model = one_time_codes::Entity::find()
            .filter(one_time_codes::Column::Email.eq(email))
            .order_by_desc(one_time_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest one-time code")?;
        Ok(model.map(|m| OneTimeCode {
            id: m.id,
            email: m.email,
            code_hash: m.code_hash,
            expires_at: m.expires_at,
            created_at: m.created_at,
        }))
    }

    async fn delete_for_email(&self, email: &str) -> Result<(), ApiError> {
        one_time_codes::Entity::delete_many()
            .filter(one_time_codes::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .context("delete one-time codes for email")?;
        Ok(())
    }
}
