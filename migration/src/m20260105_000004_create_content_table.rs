use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000003_create_module_table::Module;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Content::Table)
                    .if_not_exists()
                    .col(pk_auto(Content::Id))
                    .col(integer(Content::ModuleId))
                    .col(string(Content::Title))
                    .col(string_len(Content::Kind, 16))
                    .col(text_null(Content::RichText))
                    .col(string_null(Content::ImageUrl))
                    .col(string_null(Content::YoutubeEmbedUrl))
                    .col(integer(Content::Order))
                    .col(
                        timestamp_with_time_zone(Content::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Content::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_module_id")
                            .from(Content::Table, Content::ModuleId)
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
            .drop_table(Table::drop().table(Content::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Content {
    Table,
    Id,
    ModuleId,
    Title,
    Kind,
    RichText,
    ImageUrl,
    YoutubeEmbedUrl,
    Order,
    CreatedAt,
    UpdatedAt,
}
