pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_prices;
mod m20261001_000002_create_trade_snapshots;
mod m20261001_000003_create_mods;
mod m20261001_000004_create_passive_tree;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_prices::Migration),
            Box::new(m20261001_000002_create_trade_snapshots::Migration),
            Box::new(m20261001_000003_create_mods::Migration),
            Box::new(m20261001_000004_create_passive_tree::Migration),
        ]
    }
}
