use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::ContentKind;
use sea_orm::ActiveEnum;
use validator::Validate;

use crate::{
    model::content::{ContentDto, CreateContentDto, UpdateContentDto},
    server::{
        error::AppError,
        util::{parse::parse_content_kind, validate::optional_trimmed},
    },
};

/// A lesson item inside a module: rich text or an image, optionally with an embedded video.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub id: i32,
    pub module_id: i32,
    pub title: String,
    pub kind: ContentKind,
    pub rich_text: Option<String>,
    pub image_url: Option<String>,
    pub youtube_embed_url: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    pub fn from_entity(entity: entity::content::Model) -> Self {
        Self {
            id: entity.id,
            module_id: entity.module_id,
            title: entity.title,
            kind: entity.kind,
            rich_text: entity.rich_text,
            image_url: entity.image_url,
            youtube_embed_url: entity.youtube_embed_url,
            order: entity.order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ContentDto {
        ContentDto {
            id: self.id,
            module_id: self.module_id,
            title: self.title,
            kind: self.kind.to_value(),
            rich_text: self.rich_text,
            image_url: self.image_url,
            youtube_embed_url: self.youtube_embed_url,
            order: self.order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateContentParam {
    pub module_id: i32,
    pub title: String,
    pub kind: ContentKind,
    pub rich_text: Option<String>,
    pub image_url: Option<String>,
    pub youtube_embed_url: Option<String>,
    pub order: i32,
}

impl CreateContentParam {
    pub fn from_dto(dto: CreateContentDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            module_id: dto.module_id,
            title: dto.title.trim().to_string(),
            kind: parse_content_kind(&dto.kind)?,
            rich_text: dto.rich_text,
            image_url: optional_trimmed(dto.image_url),
            youtube_embed_url: optional_trimmed(dto.youtube_embed_url),
            order: dto.order,
        })
    }
}

/// Content update. URL fields set to an empty string are cleared.
#[derive(Debug, Clone, Default)]
pub struct UpdateContentParam {
    pub title: Option<String>,
    pub kind: Option<ContentKind>,
    pub rich_text: Option<String>,
    pub image_url: Option<Option<String>>,
    pub youtube_embed_url: Option<Option<String>>,
    pub order: Option<i32>,
}

impl UpdateContentParam {
    pub fn from_dto(dto: UpdateContentDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            title: dto.title.map(|v| v.trim().to_string()),
            kind: dto.kind.map(|v| parse_content_kind(&v)).transpose()?,
            rich_text: dto.rich_text,
            image_url: dto.image_url.map(|v| optional_trimmed(Some(v))),
            youtube_embed_url: dto.youtube_embed_url.map(|v| optional_trimmed(Some(v))),
            order: dto.order,
        })
    }
}
