use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        catalog::{CatalogNode, CatalogRepository},
        course::CourseRepository,
        module::ModuleRepository,
    },
    error::AppError,
    middleware::policy::Action,
    model::{
        module::{CreateModuleParam, Module, UpdateModuleParam},
        user::User,
    },
    service::catalog::authorize_node,
};

pub struct ModuleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModuleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a module to a course owned by `actor`.
    pub async fn create(&self, actor: &User, param: CreateModuleParam) -> Result<Module, AppError> {
        authorize_node(
            self.db,
            actor,
            CatalogNode::Course(param.course_id),
            Action::Create,
        )
        .await?;

        let module = ModuleRepository::new(self.db).create(param).await?;
        tracing::debug!("Module {} added to course {}", module.id, module.course_id);

        Ok(module)
    }

    /// Lists the modules of a course in display order.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Module>, AppError> {
        CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        Ok(ModuleRepository::new(self.db)
            .get_by_course(course_id)
            .await?)
    }

    pub async fn get_by_id(&self, module_id: i32) -> Result<Module, AppError> {
        ModuleRepository::new(self.db)
            .find_by_id(module_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))
    }

    pub async fn update(
        &self,
        actor: &User,
        module_id: i32,
        param: UpdateModuleParam,
    ) -> Result<Module, AppError> {
        authorize_node(self.db, actor, CatalogNode::Module(module_id), Action::Update).await?;

        ModuleRepository::new(self.db)
            .update(module_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))
    }

    /// Deletes a module with its contents, their comments and the completions recorded for it.
    pub async fn delete(&self, actor: &User, module_id: i32) -> Result<(), AppError> {
        authorize_node(self.db, actor, CatalogNode::Module(module_id), Action::Delete).await?;

        let txn = self.db.begin().await?;
        CatalogRepository::new(&txn).delete_module(module_id).await?;
        txn.commit().await?;

        tracing::info!("Admin {} deleted module {}", actor.id, module_id);

        Ok(())
    }
}
