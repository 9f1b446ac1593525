use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto, PaginationQuery},
        comment::{CommentDto, CommentPageDto, CommentTextDto, LikeToggleDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{comment::CommentTextParam, pagination::PageParam},
        service::comment::CommentService,
        state::AppState,
    },
};

/// Tag for grouping comment endpoints in OpenAPI documentation
pub static COMMENT_TAG: &str = "comment";

/// Post a top-level comment on a content item.
///
/// # Returns
/// - `201 Created` - Comment created
/// - `400 Bad Request` - Empty or overlong text
/// - `401 Unauthorized` - User not authenticated
/// - `404 Not Found` - Content does not exist
#[utoipa::path(
    post,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Content ID")),
    request_body = CommentTextDto,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<CommentDto>),
        (status = 400, description = "Invalid comment text", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Content not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(content_id): Path<i32>,
    Json(payload): Json<CommentTextDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let param = CommentTextParam::from_dto(payload)?;
    let comment = CommentService::new(&state.db)
        .add(&user, content_id, param)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(comment.into_dto()))))
}

/// Reply to a comment on the same content item.
#[utoipa::path(
    post,
    path = "/api/comments/{id}/reply/{comment_id}",
    tag = COMMENT_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Content ID"),
        ("comment_id" = i32, Path, description = "Parent comment ID")
    ),
    request_body = CommentTextDto,
    responses(
        (status = 201, description = "Reply created", body = ApiResponse<CommentDto>),
        (status = 400, description = "Invalid text or parent on another content item", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Content or parent comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reply_to_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((content_id, comment_id)): Path<(i32, i32)>,
    Json(payload): Json<CommentTextDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let param = CommentTextParam::from_dto(payload)?;
    let reply = CommentService::new(&state.db)
        .reply(&user, content_id, comment_id, param)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(reply.into_dto()))))
}

/// Page of top-level comments on a content item, newest first.
///
/// Each comment carries the ids of its direct replies along with reply and like counts.
#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Content ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Page of comments", body = ApiResponse<CommentPageDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Content not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(content_id): Path<i32>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = CommentService::new(&state.db)
        .list(content_id, PageParam::from_query(&pagination))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(page.into_comment_page_dto())),
    ))
}

/// Replace the text of a comment.
///
/// # Access Control
/// - Comment author or any admin
#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = CommentTextDto,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<CommentDto>),
        (status = 400, description = "Invalid comment text", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn edit_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<i32>,
    Json(payload): Json<CommentTextDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let param = CommentTextParam::from_dto(payload)?;
    let comment = CommentService::new(&state.db)
        .edit(&user, comment_id, param)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(comment.into_dto()))))
}

/// Delete a comment together with its replies and likes.
///
/// # Access Control
/// - Comment author or any admin
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not the author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    CommentService::new(&state.db)
        .delete(&user, comment_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Comment deleted"))))
}

/// Like a comment, or remove the caller's like if already present.
#[utoipa::path(
    post,
    path = "/api/comments/{id}/like",
    tag = COMMENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<LikeToggleDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let toggle = CommentService::new(&state.db)
        .toggle_like(&user, comment_id)
        .await?;

    let message = if toggle.liked { "Comment liked" } else { "Like removed" };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(message, toggle.into_dto())),
    ))
}
