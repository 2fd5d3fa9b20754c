use sea_orm_migration::prelude::*;

mod m20260501_000001_create_accounts;
mod m20260501_000002_create_restaurants;
mod m20260501_000003_create_restaurant_managers;
mod m20260501_000004_create_food_items;
mod m20260501_000005_create_tables;
mod m20260501_000006_create_one_time_codes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260501_000001_create_accounts::Migration),
            Box::new(m20260501_000002_create_restaurants::Migration),
            Box::new(m20260501_000003_create_restaurant_managers::Migration),
            Box::new(m20260501_000004_create_food_items::Migration),
            Box::new(m20260501_000005_create_tables::Migration),
            Box::new(m20260501_000006_create_one_time_codes::Migration),
        ]
    }
}
