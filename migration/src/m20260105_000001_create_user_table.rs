use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::FirstName))
                    .col(string(User::LastName))
                    .col(string_uniq(User::Email))
                    .col(string_uniq(User::PhoneNumber))
                    .col(string_len(User::RegistrantType, 16))
                    .col(string(User::PasswordHash))
                    .col(string_len(User::Role, 16).default("learner"))
                    .col(boolean(User::Verified).default(false))
                    .col(string_null(User::VerificationCodeHash))
                    .col(timestamp_with_time_zone_null(User::VerificationCodeIssuedAt))
                    .col(string_null(User::ForgotPasswordCodeHash))
                    .col(timestamp_with_time_zone_null(User::ForgotPasswordCodeIssuedAt))
                    .col(integer(User::TokenVersion).default(0))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    RegistrantType,
    PasswordHash,
    Role,
    Verified,
    VerificationCodeHash,
    VerificationCodeIssuedAt,
    ForgotPasswordCodeHash,
    ForgotPasswordCodeIssuedAt,
    TokenVersion,
    CreatedAt,
    UpdatedAt,
}
