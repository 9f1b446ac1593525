use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub id: i32,
    pub module_id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rich_text: Option<String>,
    pub image_url: Option<String>,
    pub youtube_embed_url: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentDto {
    pub module_id: i32,
    #[validate(
        length(min = 3, message = "must be at least 3 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub title: String,
    /// `text` or `image`
    #[serde(rename = "type")]
    pub kind: String,
    pub rich_text: Option<String>,
    #[validate(custom(function = "crate::server::util::validate::http_url"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "crate::server::util::validate::http_url"))]
    pub youtube_embed_url: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub order: i32,
}

/// Content update. URL fields set to an empty string are cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentDto {
    #[validate(
        length(min = 3, message = "must be at least 3 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub rich_text: Option<String>,
    #[validate(custom(function = "crate::server::util::validate::http_url"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "crate::server::util::validate::http_url"))]
    pub youtube_embed_url: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub order: Option<i32>,
}
