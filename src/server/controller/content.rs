use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        content::{ContentDto, CreateContentDto, UpdateContentDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::content::{Content, CreateContentParam, UpdateContentParam},
        service::content::ContentService,
        state::AppState,
    },
};

/// Tag for grouping content endpoints in OpenAPI documentation
pub static CONTENT_TAG: &str = "content";

/// Add a content item (text or image, optionally with an embedded video) to a module.
///
/// # Access Control
/// - `Admin` - Only the admin who created the root course
#[utoipa::path(
    post,
    path = "/api/create-content",
    tag = CONTENT_TAG,
    security(("bearer" = [])),
    request_body = CreateContentDto,
    responses(
        (status = 201, description = "Content created", body = ApiResponse<ContentDto>),
        (status = 400, description = "Invalid content data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Module not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateContentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = CreateContentParam::from_dto(payload)?;
    let content = ContentService::new(&state.db).create(&user, param).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Content created", content.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/contents/module/{module_id}",
    tag = CONTENT_TAG,
    params(("module_id" = i32, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Content items of the module", body = ApiResponse<Vec<ContentDto>>),
        (status = 404, description = "Module not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_contents_by_module(
    State(state): State<AppState>,
    Path(module_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let contents = ContentService::new(&state.db).get_by_module(module_id).await?;

    let dto: Vec<ContentDto> = contents.into_iter().map(Content::into_dto).collect();
    Ok((StatusCode::OK, Json(ApiResponse::data(dto))))
}

#[utoipa::path(
    get,
    path = "/api/contents/{id}",
    tag = CONTENT_TAG,
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content item", body = ApiResponse<ContentDto>),
        (status = 404, description = "Content not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let content = ContentService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(content.into_dto()))))
}

#[utoipa::path(
    put,
    path = "/api/contents/{id}",
    tag = CONTENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Content ID")),
    request_body = UpdateContentDto,
    responses(
        (status = 200, description = "Content updated", body = ApiResponse<ContentDto>),
        (status = 400, description = "Invalid content data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Content not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateContentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = UpdateContentParam::from_dto(payload)?;
    let content = ContentService::new(&state.db)
        .update(&user, id, param)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message("Content updated", content.into_dto())),
    ))
}

/// Delete a content item and its comments.
#[utoipa::path(
    delete,
    path = "/api/contents/{id}",
    tag = CONTENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Content not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    ContentService::new(&state.db).delete(&user, id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Content deleted"))))
}
