use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000003_create_module_table::Module,
    m20260106_000005_create_enrollment_table::Enrollment,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EnrollmentModule::Table)
                    .if_not_exists()
                    .col(integer(EnrollmentModule::EnrollmentId))
                    .col(integer(EnrollmentModule::ModuleId))
                    .col(
                        timestamp_with_time_zone(EnrollmentModule::CompletedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EnrollmentModule::EnrollmentId)
                            .col(EnrollmentModule::ModuleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_module_enrollment_id")
                            .from(EnrollmentModule::Table, EnrollmentModule::EnrollmentId)
                            .to(Enrollment::Table, Enrollment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_module_module_id")
                            .from(EnrollmentModule::Table, EnrollmentModule::ModuleId)
                            .to(Module::Table, Module::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EnrollmentModule::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EnrollmentModule {
    Table,
    EnrollmentId,
    ModuleId,
    CompletedAt,
}
