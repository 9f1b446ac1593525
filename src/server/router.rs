use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin, auth, comment, content, course, dashboard, enrollment, module, payment, progress,
        user,
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "CourseHub API", description = "Online learning platform backend"),
    modifiers(&BearerAuth),
    paths(
        auth::signup,
        auth::signin,
        auth::signout,
        auth::me,
        auth::verify_email,
        auth::send_verification_code,
        auth::verify_verification_code,
        auth::resend_verification_link,
        auth::change_password,
        auth::send_forgot_password_code,
        auth::verify_forgot_password_code,
        course::create_course,
        course::get_courses,
        course::get_course,
        course::update_course,
        course::delete_course,
        course::grouped_by_category,
        course::grouped_by_level,
        course::grouped_by_price,
        module::create_module,
        module::get_modules_by_course,
        module::get_module,
        module::update_module,
        module::delete_module,
        content::create_content,
        content::get_contents_by_module,
        content::get_content,
        content::update_content,
        content::delete_content,
        enrollment::enroll,
        enrollment::my_enrollments,
        enrollment::unenroll,
        enrollment::payment_callback,
        enrollment::admin_enrollments,
        enrollment::course_enrollments,
        enrollment::user_enrollments,
        enrollment::delete_enrollment,
        enrollment::notify_course,
        progress::complete_module,
        progress::course_progress,
        comment::add_comment,
        comment::reply_to_comment,
        comment::get_comments,
        comment::edit_comment,
        comment::delete_comment,
        comment::toggle_like,
        payment::initialize_payment,
        payment::verify_payment,
        payment::user_payments,
        payment::webhook,
        dashboard::user_dashboard,
        dashboard::user_analytics,
        dashboard::admin_dashboard,
        dashboard::admin_analytics,
        user::update_profile,
        user::get_all_users,
        user::get_user,
        user::force_verify,
        user::delete_user,
        admin::claim_admin,
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT scheme referenced by the protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/signup", post(auth::signup))
        .route("/api/signin", post(auth::signin))
        .route("/api/signout", post(auth::signout))
        .route("/api/me", get(auth::me))
        .route("/api/verify-email", get(auth::verify_email))
        .route(
            "/api/send-verification-code",
            patch(auth::send_verification_code),
        )
        .route(
            "/api/verify-verification-code",
            patch(auth::verify_verification_code),
        )
        .route(
            "/api/resend-verification-link",
            patch(auth::resend_verification_link),
        )
        .route("/api/change-password", patch(auth::change_password))
        .route(
            "/api/send-forgot-password-code",
            patch(auth::send_forgot_password_code),
        )
        .route(
            "/api/verify-forgot-password-code",
            patch(auth::verify_forgot_password_code),
        )
        // Catalog
        .route("/api/create-course", post(course::create_course))
        .route("/api/courses", get(course::get_courses))
        .route(
            "/api/courses/grouped-by-category",
            get(course::grouped_by_category),
        )
        .route("/api/courses/grouped-by-level", get(course::grouped_by_level))
        .route("/api/courses/grouped-by-price", get(course::grouped_by_price))
        .route(
            "/api/courses/{id}",
            get(course::get_course)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route("/api/create-module", post(module::create_module))
        .route(
            "/api/modules/course/{course_id}",
            get(module::get_modules_by_course),
        )
        .route(
            "/api/modules/{id}",
            get(module::get_module)
                .put(module::update_module)
                .delete(module::delete_module),
        )
        .route("/api/create-content", post(content::create_content))
        .route(
            "/api/contents/module/{module_id}",
            get(content::get_contents_by_module),
        )
        .route(
            "/api/contents/{id}",
            get(content::get_content)
                .put(content::update_content)
                .delete(content::delete_content),
        )
        // Enrollment
        .route("/api/enroll/{course_id}", post(enrollment::enroll))
        .route("/api/my-enrollments", get(enrollment::my_enrollments))
        .route("/api/unenroll/{course_id}", delete(enrollment::unenroll))
        .route("/api/payments/callback", get(enrollment::payment_callback))
        .route("/api/admin/enrollments", get(enrollment::admin_enrollments))
        .route(
            "/api/admin/enrollments/user/{user_id}",
            get(enrollment::user_enrollments),
        )
        .route(
            "/api/admin/enrollments/{id}",
            get(enrollment::course_enrollments).delete(enrollment::delete_enrollment),
        )
        .route(
            "/api/admin/courses/{course_id}/notify",
            post(enrollment::notify_course),
        )
        // Progress
        .route(
            "/api/progress/complete/{module_id}",
            post(progress::complete_module),
        )
        .route(
            "/api/progress/course/{course_id}",
            get(progress::course_progress),
        )
        // Comments
        .route(
            "/api/comments/{id}",
            post(comment::add_comment)
                .get(comment::get_comments)
                .put(comment::edit_comment)
                .delete(comment::delete_comment),
        )
        .route(
            "/api/comments/{id}/reply/{comment_id}",
            post(comment::reply_to_comment),
        )
        .route("/api/comments/{id}/like", post(comment::toggle_like))
        // Payments
        .route("/api/initialize-payment", post(payment::initialize_payment))
        .route("/api/verify/{reference}", get(payment::verify_payment))
        .route("/api/user-payments", get(payment::user_payments))
        .route("/api/webhook", post(payment::webhook))
        // Dashboards and accounts
        .route("/api/dashboard", get(dashboard::user_dashboard))
        .route("/api/analytics", get(dashboard::user_analytics))
        .route("/api/user", put(user::update_profile))
        .route("/api/admin/dashboard", get(dashboard::admin_dashboard))
        .route("/api/admin/analytics", get(dashboard::admin_analytics))
        .route("/api/admin/users", get(user::get_all_users))
        .route(
            "/api/admin/users/{id}",
            get(user::get_user).delete(user::delete_user),
        )
        .route("/api/admin/users/{id}/verify", put(user::force_verify))
        .route("/api/admin/claim", post(admin::claim_admin))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
