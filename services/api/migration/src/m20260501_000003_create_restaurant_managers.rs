use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantManagers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantManagers::RestaurantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantManagers::AccountId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantManagers::AddedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RestaurantManagers::RestaurantId)
                            .col(RestaurantManagers::AccountId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RestaurantManagers::Table, RestaurantManagers::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RestaurantManagers::Table, RestaurantManagers::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantManagers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RestaurantManagers {
    Table,
    RestaurantId,
    AccountId,
    AddedAt,
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Id,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
