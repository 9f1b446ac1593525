//! Module data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::module::{CreateModuleParam, Module, UpdateModuleParam};

pub struct ModuleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ModuleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateModuleParam) -> Result<Module, DbErr> {
        let now = Utc::now();

        let entity = entity::module::ActiveModel {
            course_id: ActiveValue::Set(param.course_id),
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            order: ActiveValue::Set(param.order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Module::from_entity(entity))
    }

    pub async fn find_by_id(&self, module_id: i32) -> Result<Option<Module>, DbErr> {
        let entity = entity::prelude::Module::find_by_id(module_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Module::from_entity))
    }

    /// Gets the modules of a course by `order`, ties broken by creation.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Module>, DbErr> {
        let entities = entity::prelude::Module::find()
            .filter(entity::module::Column::CourseId.eq(course_id))
            .order_by_asc(entity::module::Column::Order)
            .order_by_asc(entity::module::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Module::from_entity).collect())
    }

    pub async fn count_by_course(&self, course_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Module::find()
            .filter(entity::module::Column::CourseId.eq(course_id))
            .count(self.db)
            .await
    }

    /// Module ids of every course in `course_ids`.
    pub async fn get_ids_by_courses(&self, course_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Module::find()
            .select_only()
            .column(entity::module::Column::Id)
            .filter(entity::module::Column::CourseId.is_in(course_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        module_id: i32,
        param: UpdateModuleParam,
    ) -> Result<Option<Module>, DbErr> {
        let Some(entity) = entity::prelude::Module::find_by_id(module_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: entity::module::ActiveModel = entity.into();
        if let Some(title) = param.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(description) = param.description {
            model.description = ActiveValue::Set(description);
        }
        if let Some(order) = param.order {
            model.order = ActiveValue::Set(order);
        }
        model.updated_at = ActiveValue::Set(Utc::now());

        let updated = model.update(self.db).await?;
        Ok(Some(Module::from_entity(updated)))
    }
}
