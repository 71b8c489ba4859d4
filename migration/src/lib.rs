pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_leads;
mod m20260105_000002_create_subscribers;
mod m20260105_000003_create_newsletters;
mod m20260105_000004_create_properties;
mod m20260105_000005_create_testimonials;
mod m20260105_000006_create_blogs;
mod m20260105_000007_create_featured_properties;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_leads::Migration),
            Box::new(m20260105_000002_create_subscribers::Migration),
            Box::new(m20260105_000003_create_newsletters::Migration),
            Box::new(m20260105_000004_create_properties::Migration),
            Box::new(m20260105_000005_create_testimonials::Migration),
            Box::new(m20260105_000006_create_blogs::Migration),
            Box::new(m20260105_000007_create_featured_properties::Migration),
        ]
    }
}
