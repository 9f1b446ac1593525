use crate::server::{
    error::{auth::AuthError, AppError},
    model::{
        content::{CreateContentParam, UpdateContentParam},
        module::{CreateModuleParam, UpdateModuleParam},
        user::User,
    },
    service::{content::ContentService, module::ModuleService},
};
use entity::sea_orm_active_enums::ContentKind;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, module::ModuleFactory},
};

mod content;

fn module_param(course_id: i32, order: i32) -> CreateModuleParam {
    CreateModuleParam {
        course_id,
        title: format!("Week {}", order),
        description: "Ownership, borrowing and lifetimes".to_string(),
        order,
    }
}

fn image_param(module_id: i32) -> CreateContentParam {
    CreateContentParam {
        module_id,
        title: "Borrow checker diagram".to_string(),
        kind: ContentKind::Image,
        rich_text: None,
        image_url: Some("https://cdn.example.com/borrow.png".to_string()),
        youtube_embed_url: None,
        order: 1,
    }
}
