use sea_orm::entity::prelude::*;

/// Account record. Never hard-deleted: the `deleted` flag soft-deletes, and
/// every read path except the delete operation itself must filter on it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    /// Wire role string: `user`, `manager`, `admin`, `superadmin`.
    pub role: String,
    /// Argon2 hash, set only by the superadmin bootstrap flow.
    pub password_hash: Option<String>,
    pub deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurants::Entity")]
    Restaurants,
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
