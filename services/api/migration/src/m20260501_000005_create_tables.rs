use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tables::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tables::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tables::RestaurantId).uuid().not_null())
                    .col(ColumnDef::new(Tables::TableNumber).integer().not_null())
                    .col(ColumnDef::new(Tables::QrCode).text().not_null())
                    .col(ColumnDef::new(Tables::Pin).string())
                    .col(ColumnDef::new(Tables::PinExpiresAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tables::Table, Tables::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Tables::Table)
                    .col(Tables::RestaurantId)
                    .name("idx_tables_restaurant_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tables::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tables {
    Table,
    Id,
    RestaurantId,
    TableNumber,
    QrCode,
    Pin,
    PinExpiresAt,
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Id,
}
