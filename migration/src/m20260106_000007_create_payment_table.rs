use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer_null(Payment::UserId))
                    .col(string_uniq(Payment::Reference))
                    .col(big_integer(Payment::Amount))
                    .col(string_len(Payment::Currency, 8).default("NGN"))
                    .col(string_len(Payment::Status, 16).default("pending"))
                    .col(string_null(Payment::PaymentMethod))
                    .col(timestamp_with_time_zone_null(Payment::PaidAt))
                    .col(text_null(Payment::RawResponse))
                    .col(text_null(Payment::Metadata))
                    .col(
                        timestamp_with_time_zone(Payment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Payment::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_user_id")
                            .from(Payment::Table, Payment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    UserId,
    Reference,
    Amount,
    Currency,
    Status,
    PaymentMethod,
    PaidAt,
    RawResponse,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
