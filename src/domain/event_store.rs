//! In-memory, process-lifetime event storage.
//!
//! [`EventStore`] keeps every event in one ordered `Vec` behind a
//! [`tokio::sync::RwLock`]. Identifiers come from a counter that only moves
//! forward, so deleting an event never frees its id. Nothing is persisted.

use chrono::Utc;
use tokio::sync::RwLock;

use super::event::{Event, EventPatch, EventStatus, NewEvent};
use super::EventId;
use crate::error::GatewayError;

#[derive(Debug)]
struct Inner {
    events: Vec<Event>,
    next_id: u64,
}

/// Ordered store of all events.
///
/// # Concurrency
///
/// Reads run concurrently; writes are serialized by the lock. There is no
/// conflict detection: two updates to the same event both apply, and the
/// last one wins.
#[derive(Debug)]
pub struct EventStore {
    inner: RwLock<Inner>,
}

impl EventStore {
    /// Creates an empty store whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                events: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Appends a new event and returns the stored record.
    ///
    /// The input is expected to be validated already.
    pub async fn insert(&self, input: NewEvent) -> Event {
        let mut inner = self.inner.write().await;
        let id = EventId::new(inner.next_id);
        inner.next_id = inner.next_id.saturating_add(1);
        let event = input.into_event(id, Utc::now());
        inner.events.push(event.clone());
        event
    }

    /// Returns a copy of the event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if no event has this id.
    pub async fn get(&self, id: EventId) -> Result<Event, GatewayError> {
        let inner = self.inner.read().await;
        inner
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(GatewayError::EventNotFound(id))
    }

    /// Returns every event in creation order.
    pub async fn list(&self) -> Vec<Event> {
        self.inner.read().await.events.clone()
    }

    /// Returns the events of one theater in creation order.
    pub async fn list_by_theater(&self, theater_id: &str) -> Vec<Event> {
        let inner = self.inner.read().await;
        inner
            .events
            .iter()
            .filter(|e| e.theater_id == theater_id)
            .cloned()
            .collect()
    }

    /// Applies a shallow patch, re-checking the event invariants on the
    /// merged record before committing it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if no event has this id, or
    /// [`GatewayError::InvalidRequest`] if the merged record is invalid (the
    /// stored event is then left unchanged).
    pub async fn update(&self, id: EventId, patch: EventPatch) -> Result<Event, GatewayError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(GatewayError::EventNotFound(id))?;
        let mut merged = slot.clone();
        patch.apply(&mut merged, Utc::now());
        merged.check_invariants()?;
        *slot = merged.clone();
        Ok(merged)
    }

    /// Marks the event cancelled and records the reason. Cancelling an
    /// already-cancelled event only replaces the reason.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if no event has this id.
    pub async fn cancel(&self, id: EventId, reason: String) -> Result<Event, GatewayError> {
        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(GatewayError::EventNotFound(id))?;
        let now = Utc::now();
        event.status = EventStatus::Cancelled;
        event.cancellation_reason = Some(reason);
        event.cancelled_at = Some(now);
        event.updated_at = now;
        Ok(event.clone())
    }

    /// Removes the event and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if no event has this id.
    pub async fn remove(&self, id: EventId) -> Result<Event, GatewayError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(GatewayError::EventNotFound(id))?;
        Ok(inner.events.remove(index))
    }

    /// Returns the number of stored events.
    pub async fn len(&self) -> usize {
        self.inner.read().await.events.len()
    }

    /// Returns `true` if the store holds no events.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.events.is_empty()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}
