use sea_orm::entity::prelude::*;

/// Menu item. (title, restaurant_id) is unique among non-deleted rows,
/// checked in the usecase before insert/update. Price is in minor currency
/// units.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "food_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub enabled: bool,
    pub veg: bool,
    /// Wire category string: `Starters`, `Mains`, `Desserts`, `Beverages`.
    pub category: String,
    pub deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurants::Column::Id"
    )]
    Restaurant,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
