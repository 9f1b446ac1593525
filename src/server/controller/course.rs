use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto, PaginatedDto, PaginationQuery},
        course::{
            CourseDetailDto, CourseDto, CourseGroupDto, CoursePriceGroupsDto, CreateCourseDto,
            UpdateCourseDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            course::{Course, CourseGroup, CreateCourseParam, UpdateCourseParam},
            pagination::PageParam,
        },
        service::course::CourseService,
        state::AppState,
    },
};

/// Tag for grouping course endpoints in OpenAPI documentation
pub static COURSE_TAG: &str = "course";

/// Create a new course.
///
/// The slug is derived from the title and made unique with a numeric suffix. The caller
/// becomes the course owner.
///
/// # Access Control
/// - `Admin` - Only admins can create courses
///
/// # Returns
/// - `201 Created` - Course created
/// - `400 Bad Request` - Invalid course data
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
#[utoipa::path(
    post,
    path = "/api/create-course",
    tag = COURSE_TAG,
    security(("bearer" = [])),
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<CourseDto>),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = CreateCourseParam::from_dto(payload)?;
    let course = CourseService::new(&state.db).create(&user, param).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Course created", course.into_dto())),
    ))
}

/// Get courses with pagination, newest first.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Page of courses
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = COURSE_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of courses", body = ApiResponse<PaginatedDto<CourseDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageParam::from_query(&query);

    let courses = CourseService::new(&state.db).get_paginated(page).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(courses.into_dto(Course::into_dto))),
    ))
}

/// Get a course with its modules in order.
///
/// # Returns
/// - `200 OK` - Course and modules
/// - `404 Not Found` - Course does not exist
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = COURSE_TAG,
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail", body = ApiResponse<CourseDetailDto>),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let course = CourseService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(course.into_dto()))))
}

/// Update a course.
///
/// A changed title regenerates the slug.
///
/// # Access Control
/// - `Admin` - Only the admin who created the course
///
/// # Returns
/// - `200 OK` - Updated course
/// - `400 Bad Request` - Invalid course data
/// - `403 Forbidden` - Caller does not own the course
/// - `404 Not Found` - Course does not exist
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = COURSE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<CourseDto>),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = UpdateCourseParam::from_dto(payload)?;
    let course = CourseService::new(&state.db).update(&user, id, param).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message("Course updated", course.into_dto())),
    ))
}

/// Delete a course together with its modules, content, enrollments and discussion.
///
/// # Access Control
/// - `Admin` - Only the admin who created the course
///
/// # Returns
/// - `200 OK` - Course deleted
/// - `403 Forbidden` - Caller does not own the course
/// - `404 Not Found` - Course does not exist
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = COURSE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    CourseService::new(&state.db).delete(&user, id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Course deleted"))))
}

/// Courses grouped by category, categories sorted by name.
#[utoipa::path(
    get,
    path = "/api/courses/grouped-by-category",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Courses by category", body = ApiResponse<Vec<CourseGroupDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn grouped_by_category(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let groups = CourseService::new(&state.db).grouped_by_category().await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(groups_into_dto(groups)))))
}

/// Courses grouped by level, from beginner to advanced.
#[utoipa::path(
    get,
    path = "/api/courses/grouped-by-level",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Courses by level", body = ApiResponse<Vec<CourseGroupDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn grouped_by_level(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let groups = CourseService::new(&state.db).grouped_by_level().await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(groups_into_dto(groups)))))
}

/// Courses split into free and paid.
#[utoipa::path(
    get,
    path = "/api/courses/grouped-by-price",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Free and paid courses", body = ApiResponse<CoursePriceGroupsDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn grouped_by_price(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let (free, paid) = CourseService::new(&state.db).grouped_by_price().await?;

    let dto = CoursePriceGroupsDto {
        free: free.into_iter().map(Course::into_dto).collect(),
        paid: paid.into_iter().map(Course::into_dto).collect(),
    };

    Ok((StatusCode::OK, Json(ApiResponse::data(dto))))
}

fn groups_into_dto(groups: Vec<CourseGroup>) -> Vec<CourseGroupDto> {
    groups.into_iter().map(CourseGroup::into_dto).collect()
}
