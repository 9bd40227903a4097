//! Shared DTO types used across multiple endpoints.

use serde::Serialize;

/// Success envelope shared by every endpoint.
///
/// ```json
/// { "success": true, "data": { ... }, "message": "Event created" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Response payload.
    pub data: T,
    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` without a message.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Wraps `data` with a message.
    #[must_use]
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_omitted_when_absent() {
        let json = serde_json::to_value(ApiResponse::ok(3)).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "success": true, "data": 3 }));

        let json = serde_json::to_value(ApiResponse::with_message("x", "done")).unwrap_or_default();
        assert_eq!(json["message"], "done");
    }
}
