//! Content data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::model::content::{Content, CreateContentParam, UpdateContentParam};

pub struct ContentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ContentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateContentParam) -> Result<Content, DbErr> {
        let now = Utc::now();

        let entity = entity::content::ActiveModel {
            module_id: ActiveValue::Set(param.module_id),
            title: ActiveValue::Set(param.title),
            kind: ActiveValue::Set(param.kind),
            rich_text: ActiveValue::Set(param.rich_text),
            image_url: ActiveValue::Set(param.image_url),
            youtube_embed_url: ActiveValue::Set(param.youtube_embed_url),
            order: ActiveValue::Set(param.order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Content::from_entity(entity))
    }

    pub async fn find_by_id(&self, content_id: i32) -> Result<Option<Content>, DbErr> {
        let entity = entity::prelude::Content::find_by_id(content_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Content::from_entity))
    }

    pub async fn find_by_ids(&self, content_ids: &[i32]) -> Result<Vec<Content>, DbErr> {
        if content_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Content::find()
            .filter(entity::content::Column::Id.is_in(content_ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Content::from_entity).collect())
    }

    /// Gets the content items of a module by `order`.
    pub async fn get_by_module(&self, module_id: i32) -> Result<Vec<Content>, DbErr> {
        let entities = entity::prelude::Content::find()
            .filter(entity::content::Column::ModuleId.eq(module_id))
            .order_by_asc(entity::content::Column::Order)
            .order_by_asc(entity::content::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Content::from_entity).collect())
    }

    pub async fn get_ids_by_modules(&self, module_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Content::find()
            .select_only()
            .column(entity::content::Column::Id)
            .filter(entity::content::Column::ModuleId.is_in(module_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        content_id: i32,
        param: UpdateContentParam,
    ) -> Result<Option<Content>, DbErr> {
        let Some(entity) = entity::prelude::Content::find_by_id(content_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: entity::content::ActiveModel = entity.into();
        if let Some(title) = param.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(kind) = param.kind {
            model.kind = ActiveValue::Set(kind);
        }
        if let Some(rich_text) = param.rich_text {
            model.rich_text = ActiveValue::Set(Some(rich_text));
        }
        if let Some(image_url) = param.image_url {
            model.image_url = ActiveValue::Set(image_url);
        }
        if let Some(youtube_embed_url) = param.youtube_embed_url {
            model.youtube_embed_url = ActiveValue::Set(youtube_embed_url);
        }
        if let Some(order) = param.order {
            model.order = ActiveValue::Set(order);
        }
        model.updated_at = ActiveValue::Set(Utc::now());

        let updated = model.update(self.db).await?;
        Ok(Some(Content::from_entity(updated)))
    }
}
