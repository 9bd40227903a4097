//! Event service: validates requests and drives the [`EventStore`].

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::domain::{Event, EventId, EventPatch, EventStats, EventStatus, EventStore, NewEvent};
use crate::error::GatewayError;

/// Orchestration layer for event operations.
///
/// Holds a reference to the [`EventStore`]. Validation that depends on the
/// current date happens here, so the store itself stays clock-agnostic.
/// "Today" is the calendar date at the configured UTC offset.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<EventStore>,
    utc_offset: FixedOffset,
}

impl EventService {
    /// Creates a new `EventService` that reads dates in UTC.
    #[must_use]
    pub fn new(store: Arc<EventStore>) -> Self {
        Self {
            store,
            utc_offset: Utc.fix(),
        }
    }

    /// Reads "today" at `offset` instead of UTC.
    #[must_use]
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Calendar date of `now` at the service's UTC offset.
    #[must_use]
    pub fn date_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.utc_offset).date_naive()
    }

    /// Returns a reference to the inner [`EventStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    /// Validates and stores a new event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the input breaks a
    /// creation rule.
    pub async fn create_event(&self, input: NewEvent) -> Result<Event, GatewayError> {
        input.validate(self.date_at(Utc::now()))?;
        let event = self.store.insert(input).await;
        tracing::info!(
            event_id = %event.id,
            theater_id = %event.theater_id,
            movie = %event.movie_title,
            "event created"
        );
        Ok(event)
    }

    /// Returns the event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the id is unknown.
    pub async fn get_event(&self, id: EventId) -> Result<Event, GatewayError> {
        self.store.get(id).await
    }

    /// Every event in creation order.
    pub async fn list_events(&self) -> Vec<Event> {
        self.store.list().await
    }

    /// Events of one theater.
    pub async fn events_by_theater(&self, theater_id: &str) -> Vec<Event> {
        self.store.list_by_theater(theater_id).await
    }

    /// Non-cancelled events ordered by start date, as shown to ticket buyers.
    pub async fn user_events(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|e| e.status != EventStatus::Cancelled)
            .collect();
        events.sort_by_key(|e| (e.start_date, e.id));
        events
    }

    /// Applies a shallow patch.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the id is unknown, or
    /// [`GatewayError::InvalidRequest`] if the patched event is invalid.
    pub async fn update_event(
        &self,
        id: EventId,
        patch: EventPatch,
    ) -> Result<Event, GatewayError> {
        let event = self.store.update(id, patch).await?;
        tracing::info!(event_id = %id, "event updated");
        Ok(event)
    }

    /// Cancels the event with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for a blank reason and
    /// [`GatewayError::EventNotFound`] if the id is unknown.
    pub async fn cancel_event(&self, id: EventId, reason: &str) -> Result<Event, GatewayError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "cancellation reason is required".to_string(),
            ));
        }
        let event = self.store.cancel(id, reason.to_string()).await?;
        tracing::info!(event_id = %id, reason, "event cancelled");
        Ok(event)
    }

    /// Deletes the event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the id is unknown.
    pub async fn delete_event(&self, id: EventId) -> Result<Event, GatewayError> {
        let event = self.store.remove(id).await?;
        tracing::info!(event_id = %id, "event deleted");
        Ok(event)
    }

    /// Counters over all events, or over one theater's events.
    pub async fn stats(&self, theater_id: Option<&str>) -> EventStats {
        let events = match theater_id {
            Some(id) => self.store.list_by_theater(id).await,
            None => self.store.list().await,
        };
        EventStats::collect(&events)
    }
}
