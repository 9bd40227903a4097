//! Event request/response DTOs.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::NewEvent;
use crate::domain::event::DEFAULT_SEAT_CAPACITY;
use crate::error::GatewayError;

/// Request body for `POST /api/events`.
///
/// Required fields are optional here so that a missing field produces the
/// same 400 envelope as any other validation failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Owning theater (required).
    #[serde(default)]
    pub theater_id: String,
    /// Movie title (required).
    #[serde(default)]
    pub movie_title: String,
    /// First screening day, `YYYY-MM-DD` (required, not in the past).
    pub start_date: Option<NaiveDate>,
    /// Last screening day (required, not before `startDate`).
    pub end_date: Option<NaiveDate>,
    /// Daily show times (required, non-empty).
    #[serde(default)]
    pub show_times: Vec<String>,
    /// Price per ticket, 50 to 1000 inclusive (required).
    pub ticket_price: Option<u32>,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Content hash of the pinned event document.
    pub document_hash: Option<String>,
    /// Gateway URL of the pinned event document.
    pub document_url: Option<String>,
    /// Seat capacity; defaults to 100.
    pub total_seats: Option<u32>,
}

impl CreateEventRequest {
    /// Checks presence of required fields and builds a [`NewEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] naming the first missing
    /// field.
    pub fn into_new_event(self) -> Result<NewEvent, GatewayError> {
        let missing = |field: &str| GatewayError::InvalidRequest(format!("{field} is required"));
        let start_date = self.start_date.ok_or_else(|| missing("startDate"))?;
        let end_date = self.end_date.ok_or_else(|| missing("endDate"))?;
        let ticket_price = self.ticket_price.ok_or_else(|| missing("ticketPrice"))?;
        Ok(NewEvent {
            theater_id: self.theater_id,
            movie_title: self.movie_title,
            start_date,
            end_date,
            show_times: self.show_times,
            ticket_price,
            description: self.description,
            document_hash: self.document_hash,
            document_url: self.document_url,
            total_seats: self.total_seats.unwrap_or(DEFAULT_SEAT_CAPACITY),
        })
    }
}

/// Request body for `PATCH /api/events/{eventId}/cancel`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CancelEventRequest {
    /// Why the event is cancelled.
    #[serde(default)]
    pub reason: String,
}

/// Query parameters for `GET /api/events/stats`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsParams {
    /// Restrict the counters to one theater.
    pub theater_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn missing_price_is_reported_by_name() {
        let Ok(req) = serde_json::from_str::<CreateEventRequest>(
            r#"{"theaterId":"t1","movieTitle":"Film","startDate":"2030-01-01","endDate":"2030-01-02","showTimes":["18:00"]}"#,
        ) else {
            panic!("request should parse");
        };
        let Err(GatewayError::InvalidRequest(msg)) = req.into_new_event() else {
            panic!("expected a validation error");
        };
        assert!(msg.contains("ticketPrice"));
    }

    #[test]
    fn seat_capacity_defaults() {
        let req = CreateEventRequest {
            theater_id: "t1".to_string(),
            movie_title: "Film".to_string(),
            start_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            show_times: vec!["18:00".to_string()],
            ticket_price: Some(250),
            ..CreateEventRequest::default()
        };
        let Ok(event) = req.into_new_event() else {
            panic!("should convert");
        };
        assert_eq!(event.total_seats, DEFAULT_SEAT_CAPACITY);
    }
}
