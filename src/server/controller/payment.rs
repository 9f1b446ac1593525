use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        payment::{CheckoutDto, InitializePaymentDto, PaymentDto, PaymentVerificationDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::payment::{InitializePaymentParam, Payment},
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

/// Header carrying the HMAC-SHA512 of the webhook body.
const SIGNATURE_HEADER: &str = "x-paystack-signature";

fn payment_service(state: &AppState) -> PaymentService<'_> {
    PaymentService::new(
        &state.db,
        state.gateway.as_ref(),
        state.mailer.as_ref(),
        &state.payment_currency,
    )
}

/// Open a checkout for an arbitrary amount.
///
/// # Returns
/// - `201 Created` - Checkout opened and pending payment recorded
/// - `400 Bad Request` - Amount below 100 or malformed email
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Email not verified
/// - `502 Bad Gateway` / `503 Service Unavailable` - Gateway failure
#[utoipa::path(
    post,
    path = "/api/initialize-payment",
    tag = PAYMENT_TAG,
    security(("bearer" = [])),
    request_body = InitializePaymentDto,
    responses(
        (status = 201, description = "Checkout opened", body = ApiResponse<CheckoutDto>),
        (status = 400, description = "Invalid payment request", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Email not verified", body = ErrorDto),
        (status = 502, description = "Payment gateway rejected the checkout", body = ErrorDto),
        (status = 503, description = "Payment gateway unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn initialize_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<InitializePaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Verified])
        .await?;

    let param = InitializePaymentParam::from_dto(payload)?;
    let checkout = payment_service(&state).initialize(&user, param).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CheckoutDto::from(checkout))),
    ))
}

/// Verify a payment by reference.
///
/// Pending payments are checked with the gateway and settled together with the enrollment
/// they pay for. Repeated calls return the settled result without side effects.
///
/// # Access Control
/// - Payment owner or any admin
#[utoipa::path(
    get,
    path = "/api/verify/{reference}",
    tag = PAYMENT_TAG,
    security(("bearer" = [])),
    params(("reference" = String, Path, description = "Gateway payment reference")),
    responses(
        (status = 200, description = "Payment status", body = ApiResponse<PaymentVerificationDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Payment belongs to another user", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 502, description = "Payment gateway rejected the request", body = ErrorDto),
        (status = 503, description = "Payment gateway unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let verification = payment_service(&state).verify(&user, &reference).await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(verification.into_dto()))))
}

/// The caller's payments, newest first.
#[utoipa::path(
    get,
    path = "/api/user-payments",
    tag = PAYMENT_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Payments of the caller", body = ApiResponse<Vec<PaymentDto>>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn user_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let payments = payment_service(&state).user_payments(&user).await?;

    let dto: Vec<PaymentDto> = payments.into_iter().map(Payment::into_dto).collect();
    Ok((StatusCode::OK, Json(ApiResponse::data(dto))))
}

/// Gateway webhook.
///
/// The raw body is authenticated with the `x-paystack-signature` header before it is parsed.
/// Events other than `charge.success` are acknowledged and ignored.
#[utoipa::path(
    post,
    path = "/api/webhook",
    tag = PAYMENT_TAG,
    request_body(content = Object, description = "Gateway event payload"),
    responses(
        (status = 200, description = "Event accepted", body = MessageDto),
        (status = 400, description = "Malformed event body", body = ErrorDto),
        (status = 401, description = "Missing or invalid signature", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    payment_service(&state)
        .handle_webhook(&state.paystack_secret, &body, signature)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Webhook received"))))
}
