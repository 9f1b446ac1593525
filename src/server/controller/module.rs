use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        module::{CreateModuleDto, ModuleDto, UpdateModuleDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::module::{CreateModuleParam, Module, UpdateModuleParam},
        service::module::ModuleService,
        state::AppState,
    },
};

/// Tag for grouping module endpoints in OpenAPI documentation
pub static MODULE_TAG: &str = "module";

/// Add a module to a course.
///
/// # Access Control
/// - `Admin` - Only the admin who created the course
///
/// # Returns
/// - `201 Created` - Module created
/// - `400 Bad Request` - Invalid module data
/// - `403 Forbidden` - Caller does not own the course
/// - `404 Not Found` - Course does not exist
#[utoipa::path(
    post,
    path = "/api/create-module",
    tag = MODULE_TAG,
    security(("bearer" = [])),
    request_body = CreateModuleDto,
    responses(
        (status = 201, description = "Module created", body = ApiResponse<ModuleDto>),
        (status = 400, description = "Invalid module data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateModuleDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = CreateModuleParam::from_dto(payload)?;
    let module = ModuleService::new(&state.db).create(&user, param).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Module created", module.into_dto())),
    ))
}

/// Modules of a course in display order.
#[utoipa::path(
    get,
    path = "/api/modules/course/{course_id}",
    tag = MODULE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Modules of the course", body = ApiResponse<Vec<ModuleDto>>),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_modules_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let modules = ModuleService::new(&state.db).get_by_course(course_id).await?;

    let dto: Vec<ModuleDto> = modules.into_iter().map(Module::into_dto).collect();
    Ok((StatusCode::OK, Json(ApiResponse::data(dto))))
}

#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    tag = MODULE_TAG,
    params(("id" = i32, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module", body = ApiResponse<ModuleDto>),
        (status = 404, description = "Module not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let module = ModuleService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(module.into_dto()))))
}

#[utoipa::path(
    put,
    path = "/api/modules/{id}",
    tag = MODULE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Module ID")),
    request_body = UpdateModuleDto,
    responses(
        (status = 200, description = "Module updated", body = ApiResponse<ModuleDto>),
        (status = 400, description = "Invalid module data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Module not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateModuleDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = UpdateModuleParam::from_dto(payload)?;
    let module = ModuleService::new(&state.db).update(&user, id, param).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message("Module updated", module.into_dto())),
    ))
}

/// Delete a module with its content, completions and discussion.
#[utoipa::path(
    delete,
    path = "/api/modules/{id}",
    tag = MODULE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Module not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    ModuleService::new(&state.db).delete(&user, id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Module deleted"))))
}
