//! Seat layout handlers: preview generation, save, fetch, seat lookup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, GenerateLayoutRequest};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::domain::seat_layout::{PricedSeat, TheaterSeatLayout};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /api/layouts/generate` — Default layout preview.
///
/// # Errors
///
/// Returns [`GatewayError`] for zero screens, too few seats, or more than
/// [`MAX_TOTAL_SEATS`](crate::domain::seat_layout::MAX_TOTAL_SEATS).
#[utoipa::path(
    post,
    path = "/api/layouts/generate",
    tag = "Layouts",
    summary = "Generate a default seat layout",
    description = "Splits the seats evenly across screens, rows of at most 15 seats, priced by row band from recliner (front) to silver. Availability is random preview data; nothing is stored.",
    request_body = GenerateLayoutRequest,
    responses(
        (status = 200, description = "Preview layout, wrapped in the success envelope", body = TheaterSeatLayout),
        (status = 400, description = "Invalid screen or seat count", body = ErrorResponse),
    )
)]
pub async fn generate_layout(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateLayoutRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let layout = state.layout_service.preview(
        &req.theater_id,
        &req.theater_name,
        req.screens,
        req.total_seats,
    )?;
    Ok(Json(ApiResponse::ok(layout)))
}

/// `GET /api/layouts/{theaterId}` — Saved layout.
///
/// # Errors
///
/// Returns [`GatewayError::LayoutNotFound`] if none was saved.
#[utoipa::path(
    get,
    path = "/api/layouts/{theater_id}",
    tag = "Layouts",
    summary = "Get a saved seat layout",
    params(("theater_id" = String, Path, description = "Theater identifier")),
    responses(
        (status = 200, description = "Saved layout, wrapped in the success envelope", body = TheaterSeatLayout),
        (status = 404, description = "No layout saved", body = ErrorResponse),
    )
)]
pub async fn get_layout(
    State(state): State<AppState>,
    Path(theater_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let layout = state.layout_service.get(&theater_id).await?;
    Ok(Json(ApiResponse::ok(layout)))
}

/// `PUT /api/layouts/{theaterId}` — Save a layout.
///
/// # Errors
///
/// Returns [`GatewayError`] if the layout is inconsistent or names another
/// theater.
#[utoipa::path(
    put,
    path = "/api/layouts/{theater_id}",
    tag = "Layouts",
    summary = "Save a seat layout",
    params(("theater_id" = String, Path, description = "Theater identifier")),
    request_body = TheaterSeatLayout,
    responses(
        (status = 200, description = "Stored layout, wrapped in the success envelope", body = TheaterSeatLayout),
        (status = 400, description = "Inconsistent layout", body = ErrorResponse),
    )
)]
pub async fn save_layout(
    State(state): State<AppState>,
    Path(theater_id): Path<String>,
    ApiJson(layout): ApiJson<TheaterSeatLayout>,
) -> Result<impl IntoResponse, GatewayError> {
    let layout = state.layout_service.save(&theater_id, layout).await?;
    Ok(Json(ApiResponse::with_message(layout, "Layout saved")))
}

/// `GET /api/layouts/{theaterId}/screens/{screenId}/seats/{row}/{number}` —
/// One seat with its price.
///
/// # Errors
///
/// Returns [`GatewayError`] if the layout or seat does not exist.
#[utoipa::path(
    get,
    path = "/api/layouts/{theater_id}/screens/{screen_id}/seats/{row}/{number}",
    tag = "Layouts",
    summary = "Look up a seat",
    params(
        ("theater_id" = String, Path, description = "Theater identifier"),
        ("screen_id" = String, Path, description = "Screen identifier, e.g. `screen-1`"),
        ("row" = String, Path, description = "Row label, e.g. `A`"),
        ("number" = u32, Path, description = "Seat number within the row, from 1"),
    ),
    responses(
        (status = 200, description = "Seat and price, wrapped in the success envelope", body = PricedSeat),
        (status = 404, description = "Layout or seat not found", body = ErrorResponse),
    )
)]
pub async fn get_seat(
    State(state): State<AppState>,
    Path((theater_id, screen_id, row, number)): Path<(String, String, String, String)>,
) -> Result<impl IntoResponse, GatewayError> {
    let number: u32 = number
        .parse()
        .map_err(|_| GatewayError::InvalidRequest(format!("invalid seat number: {number}")))?;
    let seat = state
        .layout_service
        .seat(&theater_id, &screen_id, &row, number)
        .await?;
    Ok(Json(ApiResponse::ok(seat)))
}

/// Seat layout routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/layouts/generate", post(generate_layout))
        .route("/layouts/{theater_id}", get(get_layout).put(save_layout))
        .route(
            "/layouts/{theater_id}/screens/{screen_id}/seats/{row}/{number}",
            get(get_seat),
        )
}
