//! Theater catalogue handlers: aggregated reads over owner-side records.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ApiResponse;
use crate::api::extract::ApiQuery;
use crate::app_state::AppState;
use crate::domain::{Event, TheaterListing};
use crate::error::{ErrorResponse, GatewayError};
use crate::service::TheaterQuery;

/// `GET /api/theaters` — Every theater with its events.
#[utoipa::path(
    get,
    path = "/api/theaters",
    tag = "Theaters",
    summary = "List theaters",
    description = "Approved theaters with their events, plus the on-chain venue when on-chain events exist. Theaters whose events cannot be read are left out.",
    responses(
        (status = 200, description = "Theaters, wrapped in the success envelope", body = Vec<TheaterListing>),
    )
)]
pub async fn list_theaters(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.theater_service.all_theaters().await))
}

/// `GET /api/theaters/near/{pincode}` — Theaters near a pincode.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidPincode`] unless the pincode is 6 digits.
#[utoipa::path(
    get,
    path = "/api/theaters/near/{pincode}",
    tag = "Theaters",
    summary = "Theaters near a pincode",
    params(("pincode" = String, Path, description = "6-digit pincode")),
    responses(
        (status = 200, description = "Nearby theaters, closest first, wrapped in the success envelope", body = Vec<TheaterListing>),
        (status = 400, description = "Invalid pincode", body = ErrorResponse),
    )
)]
pub async fn theaters_near(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let theaters = state.theater_service.theaters_near(&pincode).await?;
    Ok(Json(ApiResponse::ok(theaters)))
}

/// `GET /api/theaters/city/{cityName}` — Theaters in a city.
#[utoipa::path(
    get,
    path = "/api/theaters/city/{city_name}",
    tag = "Theaters",
    summary = "Theaters in a city",
    params(("city_name" = String, Path, description = "City name")),
    responses(
        (status = 200, description = "Theaters in or near the city, wrapped in the success envelope", body = Vec<TheaterListing>),
    )
)]
pub async fn theaters_in_city(
    State(state): State<AppState>,
    Path(city_name): Path<String>,
) -> impl IntoResponse {
    Json(ApiResponse::ok(
        state.theater_service.theaters_in_city(&city_name).await,
    ))
}

/// `GET /api/theaters/search` — Free-text theater search.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidPincode`] for a malformed pincode filter.
#[utoipa::path(
    get,
    path = "/api/theaters/search",
    tag = "Theaters",
    summary = "Search theaters",
    params(TheaterQuery),
    responses(
        (status = 200, description = "Matching theaters, wrapped in the success envelope", body = Vec<TheaterListing>),
        (status = 400, description = "Invalid pincode filter", body = ErrorResponse),
    )
)]
pub async fn search_theaters(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TheaterQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let theaters = state.theater_service.search(&query).await?;
    Ok(Json(ApiResponse::ok(theaters)))
}

/// `GET /api/events/near/{pincode}` — Events at theaters near a pincode.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidPincode`] unless the pincode is 6 digits.
#[utoipa::path(
    get,
    path = "/api/events/near/{pincode}",
    tag = "Theaters",
    summary = "Events near a pincode",
    params(("pincode" = String, Path, description = "6-digit pincode")),
    responses(
        (status = 200, description = "Events, closest theater first, wrapped in the success envelope", body = Vec<Event>),
        (status = 400, description = "Invalid pincode", body = ErrorResponse),
    )
)]
pub async fn events_near(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let events = state.theater_service.events_near(&pincode).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// Theater catalogue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/theaters", get(list_theaters))
        .route("/theaters/near/{pincode}", get(theaters_near))
        .route("/theaters/city/{city_name}", get(theaters_in_city))
        .route("/theaters/search", get(search_theaters))
        .route("/events/near/{pincode}", get(events_near))
}
