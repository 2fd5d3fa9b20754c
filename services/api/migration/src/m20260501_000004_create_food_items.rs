use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoodItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FoodItems::RestaurantId).uuid().not_null())
                    .col(ColumnDef::new(FoodItems::Title).string().not_null())
                    .col(ColumnDef::new(FoodItems::Description).string())
                    .col(ColumnDef::new(FoodItems::Price).big_integer().not_null())
                    .col(ColumnDef::new(FoodItems::Image).string())
                    .col(
                        ColumnDef::new(FoodItems::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FoodItems::Veg)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(FoodItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(FoodItems::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FoodItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoodItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FoodItems::Table, FoodItems::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(FoodItems::Table)
                    .col(FoodItems::RestaurantId)
                    .col(FoodItems::Title)
                    .name("idx_food_items_restaurant_id_title")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoodItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FoodItems {
    Table,
    Id,
    RestaurantId,
    Title,
    Description,
    Price,
    Image,
    Enabled,
    Veg,
    Category,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Id,
}
