use sea_orm::entity::prelude::*;

/// Dining table with its QR payload. Regeneration replaces all rows of a
/// restaurant inside one transaction. `pin`/`pin_expires_at` are reserved for
/// the dine-in auth flow; no endpoint sets them yet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub qr_code: String,
    pub pin: Option<String>,
    pub pin_expires_at: Option<chrono::DateTime<chrono::Utc>>,
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
