//! Session endpoints for the three dashboards.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::extract::{Credentials, Session};
use crate::app_state::AppState;
use crate::auth::{Dashboard, Identity};
use crate::error::{ErrorResponse, GatewayError};

/// Caller identity as seen by one dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionInfo {
    /// Dashboard namespace.
    pub dashboard: Dashboard,
    /// Verified identity.
    pub identity: Identity,
}

/// Result of a logout.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResult {
    /// Dashboard namespace.
    pub dashboard: Dashboard,
    /// Whether a session was open.
    pub had_session: bool,
}

/// `GET /api/auth/me` — Verify the bearer token and open a session.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    summary = "Current identity",
    description = "Verifies `Authorization: Bearer <token>` and records a session in the namespace named by `X-Dashboard` (`user`, `owner` or `admin`; default `user`).",
    responses(
        (status = 200, description = "Identity, wrapped in the success envelope", body = SessionInfo),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
    )
)]
pub async fn me(session: Session) -> impl IntoResponse {
    Json(ApiResponse::ok(SessionInfo {
        dashboard: session.dashboard,
        identity: session.identity,
    }))
}

/// `POST /api/auth/logout` — Close the session.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthorized`] if the token is rejected.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    summary = "Log out",
    responses(
        (status = 200, description = "Logout result, wrapped in the success envelope", body = LogoutResult),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    credentials: Credentials,
) -> Result<impl IntoResponse, GatewayError> {
    let had_session = state
        .auth_service
        .logout(credentials.dashboard, &credentials.token)
        .await?;
    Ok(Json(ApiResponse::with_message(
        LogoutResult {
            dashboard: credentials.dashboard,
            had_session,
        },
        "Logged out",
    )))
}

/// Auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
}
