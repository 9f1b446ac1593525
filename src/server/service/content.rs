use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        catalog::{CatalogNode, CatalogRepository},
        content::ContentRepository,
        module::ModuleRepository,
    },
    error::AppError,
    middleware::policy::Action,
    model::{
        content::{Content, CreateContentParam, UpdateContentParam},
        user::User,
    },
    service::catalog::authorize_node,
};

pub struct ContentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a content item to a module of a course owned by `actor`.
    pub async fn create(
        &self,
        actor: &User,
        param: CreateContentParam,
    ) -> Result<Content, AppError> {
        authorize_node(
            self.db,
            actor,
            CatalogNode::Module(param.module_id),
            Action::Create,
        )
        .await?;

        Ok(ContentRepository::new(self.db).create(param).await?)
    }

    /// Lists the content items of a module in display order.
    pub async fn get_by_module(&self, module_id: i32) -> Result<Vec<Content>, AppError> {
        ModuleRepository::new(self.db)
            .find_by_id(module_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))?;

        Ok(ContentRepository::new(self.db)
            .get_by_module(module_id)
            .await?)
    }

    pub async fn get_by_id(&self, content_id: i32) -> Result<Content, AppError> {
        ContentRepository::new(self.db)
            .find_by_id(content_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))
    }

    pub async fn update(
        &self,
        actor: &User,
        content_id: i32,
        param: UpdateContentParam,
    ) -> Result<Content, AppError> {
        authorize_node(
            self.db,
            actor,
            CatalogNode::Content(content_id),
            Action::Update,
        )
        .await?;

        ContentRepository::new(self.db)
            .update(content_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))
    }

    /// Deletes a content item together with its comments and their likes.
    pub async fn delete(&self, actor: &User, content_id: i32) -> Result<(), AppError> {
        authorize_node(
            self.db,
            actor,
            CatalogNode::Content(content_id),
            Action::Delete,
        )
        .await?;

        let txn = self.db.begin().await?;
        CatalogRepository::new(&txn).delete_content(content_id).await?;
        txn.commit().await?;

        Ok(())
    }
}
