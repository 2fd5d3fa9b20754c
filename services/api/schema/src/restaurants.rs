use sea_orm::entity::prelude::*;

/// Restaurant record. `owner_id` references an admin account and is immutable
/// after creation; the manager set lives in `restaurant_managers`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: i32,
    pub gstin: Option<String>,
    pub restrict: bool,
    pub deleted: bool,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::OwnerId",
        to = "super::accounts::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::food_items::Entity")]
    FoodItems,
    #[sea_orm(has_many = "super::tables::Entity")]
    Tables,
    #[sea_orm(has_many = "super::restaurant_managers::Entity")]
    Managers,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::food_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodItems.def()
    }
}

impl Related<super::tables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tables.def()
    }
}

impl Related<super::restaurant_managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Managers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
