//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and a JSON body in the uniform
//! failure envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::phone::PhoneError;
use crate::domain::seat_layout::LayoutError;
use crate::domain::{ApplicationId, EventId};

/// Failure envelope shared by every endpoint.
///
/// ```json
/// {
///   "success": false,
///   "message": "ticket price must be between 50 and 1000",
///   "code": 1001
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub message: String,
    /// Numeric error code (see [`GatewayError`] code ranges).
    pub code: u32,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category             | HTTP Status               |
/// |-----------|----------------------|---------------------------|
/// | 1000–1999 | Validation           | 400 Bad Request           |
/// | 2000–2999 | Not Found / Conflict | 404 Not Found / 409       |
/// | 3000–3999 | Server / Upstream    | 500 / 502                 |
/// | 4000–4999 | Authentication       | 401 Unauthorized          |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("{0}")]
    InvalidRequest(String),

    /// Pincode is not a 6-digit string.
    #[error("invalid pincode: {0}; expected 6 digits")]
    InvalidPincode(String),

    /// Phone number failed validation.
    #[error(transparent)]
    InvalidPhone(#[from] PhoneError),

    /// Seat layout parameters are unusable.
    #[error(transparent)]
    InvalidLayout(#[from] LayoutError),

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Theater application with the given ID was not found.
    #[error("theater application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    /// No seat layout has been saved for the theater.
    #[error("seat layout not found for theater {0}")]
    LayoutNotFound(String),

    /// Seat does not exist in the layout.
    #[error("seat not found: {0}")]
    SeatNotFound(String),

    /// The requested transition is not allowed in the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Bearer token missing or rejected by the verifier.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The owner-side service could not be reached or answered badly.
    #[error("upstream service error: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidPincode(_) => 1002,
            Self::InvalidPhone(_) => 1003,
            Self::InvalidLayout(_) => 1004,
            Self::EventNotFound(_) => 2001,
            Self::ApplicationNotFound(_) => 2002,
            Self::LayoutNotFound(_) => 2003,
            Self::SeatNotFound(_) => 2004,
            Self::Conflict(_) => 2009,
            Self::Internal(_) => 3000,
            Self::Upstream(_) => 3002,
            Self::Unauthorized(_) => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidPincode(_)
            | Self::InvalidPhone(_)
            | Self::InvalidLayout(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_)
            | Self::ApplicationNotFound(_)
            | Self::LayoutNotFound(_)
            | Self::SeatNotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients. Internal details stay in the log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "internal server error".to_string(),
            Self::Upstream(_) => "upstream service unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "request rejected");
        }
        let body = ErrorResponse {
            success: false,
            message: self.public_message(),
            code: self.error_code(),
            details: None,
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
