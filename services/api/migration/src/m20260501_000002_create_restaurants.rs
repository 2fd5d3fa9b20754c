use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string().not_null())
                    .col(ColumnDef::new(Restaurants::Address1).string().not_null())
                    .col(ColumnDef::new(Restaurants::Address2).string())
                    .col(ColumnDef::new(Restaurants::City).string().not_null())
                    .col(ColumnDef::new(Restaurants::State).string().not_null())
                    .col(ColumnDef::new(Restaurants::Pincode).integer().not_null())
                    .col(ColumnDef::new(Restaurants::Gstin).string())
                    .col(
                        ColumnDef::new(Restaurants::Restrict)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Restaurants::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Restaurants::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Restaurants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Restaurants::Table, Restaurants::OwnerId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Restaurants::Table)
                    .col(Restaurants::OwnerId)
                    .name("idx_restaurants_owner_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Id,
    Name,
    Address1,
    Address2,
    City,
    State,
    Pincode,
    Gstin,
    Restrict,
    Deleted,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
