pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_course_table;
mod m20260105_000003_create_module_table;
mod m20260105_000004_create_content_table;
mod m20260106_000005_create_enrollment_table;
mod m20260106_000006_create_enrollment_module_table;
mod m20260106_000007_create_payment_table;
mod m20260107_000008_create_comment_table;
mod m20260107_000009_create_comment_like_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_course_table::Migration),
            Box::new(m20260105_000003_create_module_table::Migration),
            Box::new(m20260105_000004_create_content_table::Migration),
            Box::new(m20260106_000005_create_enrollment_table::Migration),
            Box::new(m20260106_000006_create_enrollment_module_table::Migration),
            Box::new(m20260106_000007_create_payment_table::Migration),
            Box::new(m20260107_000008_create_comment_table::Migration),
            Box::new(m20260107_000009_create_comment_like_table::Migration),
        ]
    }
}
