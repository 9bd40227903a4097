//! Theater application handlers: submit, list, get, approve, reject.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, ApplicationListParams, ReviewRequest};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::app_state::AppState;
use crate::domain::{ApplicationId, NewApplication, TheaterApplication};
use crate::error::{ErrorResponse, GatewayError};

fn parse_application_id(raw: &str) -> Result<ApplicationId, GatewayError> {
    raw.parse::<ApplicationId>()
        .map_err(|_| GatewayError::InvalidRequest(format!("invalid application id: {raw}")))
}

/// `POST /api/theater-applications` — Submit an application.
///
/// # Errors
///
/// Returns [`GatewayError`] if a field fails validation.
#[utoipa::path(
    post,
    path = "/api/theater-applications",
    tag = "Theater Applications",
    summary = "Submit a theater application",
    request_body = NewApplication,
    responses(
        (status = 201, description = "Pending application, wrapped in the success envelope", body = TheaterApplication),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
pub async fn submit_application(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewApplication>,
) -> Result<impl IntoResponse, GatewayError> {
    let application = state.application_service.submit(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            application,
            "Application submitted successfully",
        )),
    ))
}

/// `GET /api/theater-applications` — List applications.
///
/// # Errors
///
/// Returns [`GatewayError`] on an unknown status filter.
#[utoipa::path(
    get,
    path = "/api/theater-applications",
    tag = "Theater Applications",
    summary = "List theater applications",
    params(ApplicationListParams),
    responses(
        (status = 200, description = "Applications in submission order, wrapped in the success envelope", body = Vec<TheaterApplication>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
    )
)]
pub async fn list_applications(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ApplicationListParams>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(ApiResponse::ok(
        state.application_service.list(params.status).await,
    )))
}

/// `GET /api/theater-applications/approved` — Approved applications.
#[utoipa::path(
    get,
    path = "/api/theater-applications/approved",
    tag = "Theater Applications",
    summary = "List approved applications",
    responses(
        (status = 200, description = "Approved applications, wrapped in the success envelope", body = Vec<TheaterApplication>),
    )
)]
pub async fn approved_applications(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.application_service.approved().await))
}

/// `GET /api/theater-applications/{id}` — One application.
///
/// # Errors
///
/// Returns [`GatewayError::ApplicationNotFound`] if the id is unknown.
#[utoipa::path(
    get,
    path = "/api/theater-applications/{id}",
    tag = "Theater Applications",
    summary = "Get a theater application",
    params(("id" = String, Path, description = "Application UUID")),
    responses(
        (status = 200, description = "The application, wrapped in the success envelope", body = TheaterApplication),
        (status = 404, description = "Application not found", body = ErrorResponse),
    )
)]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let application = state
        .application_service
        .get(parse_application_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(application)))
}

/// `PATCH /api/theater-applications/{id}/approve` — Approve.
///
/// # Errors
///
/// Returns [`GatewayError`] if the id is unknown or it was already reviewed.
#[utoipa::path(
    patch,
    path = "/api/theater-applications/{id}/approve",
    tag = "Theater Applications",
    summary = "Approve a theater application",
    params(("id" = String, Path, description = "Application UUID")),
    request_body(content = ReviewRequest, description = "Optional remark"),
    responses(
        (status = 200, description = "Approved application, wrapped in the success envelope", body = TheaterApplication),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse),
    )
)]
pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    // The remark is optional, and so is the body carrying it.
    let note = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<ReviewRequest>(&body)
            .map_err(|e| GatewayError::InvalidRequest(format!("invalid review body: {e}")))?
            .reason
    };
    let application = state
        .application_service
        .approve(parse_application_id(&id)?, note)
        .await?;
    Ok(Json(ApiResponse::with_message(
        application,
        "Application approved",
    )))
}

/// `PATCH /api/theater-applications/{id}/reject` — Reject with a reason.
///
/// # Errors
///
/// Returns [`GatewayError`] if the reason is blank, the id is unknown, or
/// it was already reviewed.
#[utoipa::path(
    patch,
    path = "/api/theater-applications/{id}/reject",
    tag = "Theater Applications",
    summary = "Reject a theater application",
    params(("id" = String, Path, description = "Application UUID")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Rejected application, wrapped in the success envelope", body = TheaterApplication),
        (status = 400, description = "Missing reason", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse),
    )
)]
pub async fn reject_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ReviewRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let application = state
        .application_service
        .reject(
            parse_application_id(&id)?,
            req.reason.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(ApiResponse::with_message(
        application,
        "Application rejected",
    )))
}

/// Theater application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/theater-applications",
            get(list_applications).post(submit_application),
        )
        .route(
            "/theater-applications/approved",
            get(approved_applications),
        )
        .route("/theater-applications/{id}", get(get_application))
        .route(
            "/theater-applications/{id}/approve",
            patch(approve_application),
        )
        .route(
            "/theater-applications/{id}/reject",
            patch(reject_application),
        )
}
