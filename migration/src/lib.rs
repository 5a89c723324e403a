pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250301_000001_dashboard_tables;
mod m20250302_000001_posting_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_dashboard_tables::Migration),
            Box::new(m20250302_000001_posting_indexes::Migration),
        ]
    }
}
