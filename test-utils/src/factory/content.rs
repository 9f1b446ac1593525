//! Content factory for creating test module content entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::ContentKind;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test content items.
pub struct ContentFactory<'a> {
    db: &'a DatabaseConnection,
    module_id: i32,
    title: String,
    kind: ContentKind,
    order: i32,
}

impl<'a> ContentFactory<'a> {
    /// Creates a new ContentFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Content {id}"`
    /// - kind: `text` with a short rich text body
    /// - order: `1`
    pub fn new(db: &'a DatabaseConnection, module_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            module_id,
            title: format!("Content {}", id),
            kind: ContentKind::Text,
            order: 1,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Builds and inserts the content entity into the database.
    pub async fn build(self) -> Result<entity::content::Model, DbErr> {
        let now = Utc::now();
        let (rich_text, image_url) = match self.kind {
            ContentKind::Text => (Some("<p>Lesson body</p>".to_string()), None),
            ContentKind::Image => (None, Some("https://cdn.example.com/lesson.png".to_string())),
        };

        entity::content::ActiveModel {
            module_id: ActiveValue::Set(self.module_id),
            title: ActiveValue::Set(self.title),
            kind: ActiveValue::Set(self.kind),
            rich_text: ActiveValue::Set(rich_text),
            image_url: ActiveValue::Set(image_url),
            youtube_embed_url: ActiveValue::Set(None),
            order: ActiveValue::Set(self.order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a text content item in `module_id`.
pub async fn create_content(
    db: &DatabaseConnection,
    module_id: i32,
) -> Result<entity::content::Model, DbErr> {
    ContentFactory::new(db, module_id).build().await
}
