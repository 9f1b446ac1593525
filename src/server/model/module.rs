use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    model::module::{CreateModuleDto, ModuleDto, UpdateModuleDto},
    server::error::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub description: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    pub fn from_entity(entity: entity::module::Model) -> Self {
        Self {
            id: entity.id,
            course_id: entity.course_id,
            title: entity.title,
            description: entity.description,
            order: entity.order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ModuleDto {
        ModuleDto {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            order: self.order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateModuleParam {
    pub course_id: i32,
    pub title: String,
    pub description: String,
    pub order: i32,
}

impl CreateModuleParam {
    pub fn from_dto(dto: CreateModuleDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            course_id: dto.course_id,
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            order: dto.order,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateModuleParam {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

impl UpdateModuleParam {
    pub fn from_dto(dto: UpdateModuleDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            title: dto.title.map(|v| v.trim().to_string()),
            description: dto.description.map(|v| v.trim().to_string()),
            order: dto.order,
        })
    }
}
