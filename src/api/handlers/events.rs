//! Event handlers: create, list, get, update, cancel, delete, stats.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::dto::{ApiResponse, CancelEventRequest, CreateEventRequest, StatsParams};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::app_state::AppState;
use crate::domain::{Event, EventId, EventPatch, EventStats};
use crate::error::{ErrorResponse, GatewayError};

fn parse_event_id(raw: &str) -> Result<EventId, GatewayError> {
    raw.parse()
        .map_err(|_| GatewayError::InvalidRequest(format!("invalid event id: {raw}")))
}

/// `POST /api/events` — Create an event.
///
/// # Errors
///
/// Returns [`GatewayError`] if a field is missing or breaks a creation rule.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create an event",
    description = "Validates and stores a new screening event. Ticket price must be 50 to 1000, the start date must not be in the past and the end date must not precede it.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created, wrapped in the success envelope", body = Event),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .event_service
        .create_event(req.into_new_event()?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(event, "Event created successfully")),
    ))
}

/// `GET /api/events` — Every event.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List all events",
    responses(
        (status = 200, description = "All events in creation order, wrapped in the success envelope", body = Vec<Event>),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.event_service.list_events().await))
}

/// `GET /api/events/user` — Events visible to ticket buyers.
#[utoipa::path(
    get,
    path = "/api/events/user",
    tag = "Events",
    summary = "List events for users",
    description = "Non-cancelled events ordered by start date.",
    responses(
        (status = 200, description = "Bookable events, wrapped in the success envelope", body = Vec<Event>),
    )
)]
pub async fn user_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.event_service.user_events().await))
}

/// `GET /api/events/theater/{theaterId}` — Events of one theater.
#[utoipa::path(
    get,
    path = "/api/events/theater/{theater_id}",
    tag = "Events",
    summary = "List events of a theater",
    params(("theater_id" = String, Path, description = "Theater identifier")),
    responses(
        (status = 200, description = "Events of the theater, wrapped in the success envelope", body = Vec<Event>),
    )
)]
pub async fn theater_events(
    State(state): State<AppState>,
    Path(theater_id): Path<String>,
) -> impl IntoResponse {
    Json(ApiResponse::ok(
        state.event_service.events_by_theater(&theater_id).await,
    ))
}

/// `GET /api/events/stats` — Event counters.
///
/// # Errors
///
/// Returns [`GatewayError`] on a malformed query string.
#[utoipa::path(
    get,
    path = "/api/events/stats",
    tag = "Events",
    summary = "Event statistics",
    description = "Counts per status, tickets sold and revenue over non-cancelled events, optionally for one theater.",
    params(StatsParams),
    responses(
        (status = 200, description = "Counters, wrapped in the success envelope", body = EventStats),
    )
)]
pub async fn event_stats(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<StatsParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let theater_id = params.theater_id.as_deref().filter(|t| !t.is_empty());
    Ok(Json(ApiResponse::ok(
        state.event_service.stats(theater_id).await,
    )))
}

/// `GET /api/events/{eventId}` — One event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the id is unknown.
#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    tag = "Events",
    summary = "Get an event",
    params(("event_id" = u64, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "The event, wrapped in the success envelope", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .event_service
        .get_event(parse_event_id(&event_id)?)
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// `PUT /api/events/{eventId}` — Shallow update.
///
/// # Errors
///
/// Returns [`GatewayError`] if the id is unknown or the patched event is
/// invalid.
#[utoipa::path(
    put,
    path = "/api/events/{event_id}",
    tag = "Events",
    summary = "Update an event",
    description = "Every field present in the body replaces the stored one. The merged event must still satisfy the price, date and seat rules.",
    params(("event_id" = u64, Path, description = "Event identifier")),
    request_body = EventPatch,
    responses(
        (status = 200, description = "Updated event, wrapped in the success envelope", body = Event),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    ApiJson(patch): ApiJson<EventPatch>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .event_service
        .update_event(parse_event_id(&event_id)?, patch)
        .await?;
    Ok(Json(ApiResponse::with_message(
        event,
        "Event updated successfully",
    )))
}

/// `PATCH /api/events/{eventId}/cancel` — Cancel with a reason.
///
/// # Errors
///
/// Returns [`GatewayError`] if the id is unknown or the reason is blank.
#[utoipa::path(
    patch,
    path = "/api/events/{event_id}/cancel",
    tag = "Events",
    summary = "Cancel an event",
    params(("event_id" = u64, Path, description = "Event identifier")),
    request_body = CancelEventRequest,
    responses(
        (status = 200, description = "Cancelled event, wrapped in the success envelope", body = Event),
        (status = 400, description = "Missing reason", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn cancel_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    ApiJson(req): ApiJson<CancelEventRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .event_service
        .cancel_event(parse_event_id(&event_id)?, &req.reason)
        .await?;
    Ok(Json(ApiResponse::with_message(
        event,
        "Event cancelled successfully",
    )))
}

/// `DELETE /api/events/{eventId}` — Delete an event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the id is unknown.
#[utoipa::path(
    delete,
    path = "/api/events/{event_id}",
    tag = "Events",
    summary = "Delete an event",
    params(("event_id" = u64, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Deleted event, wrapped in the success envelope", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .event_service
        .delete_event(parse_event_id(&event_id)?)
        .await?;
    Ok(Json(ApiResponse::with_message(
        event,
        "Event deleted successfully",
    )))
}

/// Event routes. `/api/events/near/{pincode}` lives with the theater routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/user", get(user_events))
        .route("/events/stats", get(event_stats))
        .route("/events/theater/{theater_id}", get(theater_events))
        .route(
            "/events/{event_id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{event_id}/cancel", patch(cancel_event))
}
