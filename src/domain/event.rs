//! Screening events and their validation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;
use crate::error::GatewayError;

/// Lowest accepted ticket price.
pub const MIN_TICKET_PRICE: u32 = 50;

/// Highest accepted ticket price.
pub const MAX_TICKET_PRICE: u32 = 1000;

/// Seat capacity of an event when none is given.
pub const DEFAULT_SEAT_CAPACITY: u32 = 100;

/// Theater ids carrying this prefix were registered on-chain rather than
/// through an application.
pub const BLOCKCHAIN_THEATER_PREFIX: &str = "blockchain_";

/// Lifecycle of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Not started yet.
    #[default]
    Upcoming,
    /// Currently screening.
    Ongoing,
    /// Finished.
    Completed,
    /// Called off by the owner.
    Cancelled,
}

impl EventStatus {
    /// Whether users can still buy tickets.
    #[must_use]
    pub const fn is_bookable(self) -> bool {
        matches!(self, Self::Upcoming | Self::Ongoing)
    }
}

/// A screening of one movie at one theater over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Owning theater.
    pub theater_id: String,
    /// Movie shown.
    pub movie_title: String,
    /// First screening day.
    pub start_date: NaiveDate,
    /// Last screening day.
    pub end_date: NaiveDate,
    /// Daily show times (e.g. `"18:30"`).
    pub show_times: Vec<String>,
    /// Price per ticket in rupees.
    pub ticket_price: u32,
    /// Free-form description.
    pub description: String,
    /// Content hash of the pinned event document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_hash: Option<String>,
    /// Gateway URL of the pinned event document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Seats still on sale.
    pub available_seats: u32,
    /// Seat capacity.
    pub total_seats: u32,
    /// Why the event was cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    /// When the event was (last) cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Tickets sold so far.
    #[must_use]
    pub const fn tickets_sold(&self) -> u32 {
        self.total_seats.saturating_sub(self.available_seats)
    }

    /// Revenue from tickets sold so far.
    #[must_use]
    pub const fn revenue(&self) -> u64 {
        self.tickets_sold() as u64 * self.ticket_price as u64
    }

    /// Whether the theater was registered on-chain.
    #[must_use]
    pub fn is_blockchain_tagged(&self) -> bool {
        self.theater_id.starts_with(BLOCKCHAIN_THEATER_PREFIX)
    }

    /// Checks the invariants shared by create and update.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] describing the first
    /// violated rule.
    pub fn check_invariants(&self) -> Result<(), GatewayError> {
        check_title(&self.movie_title)?;
        check_capacity(self.total_seats)?;
        check_price(self.ticket_price)?;
        check_show_times(&self.show_times)?;
        check_date_order(self.start_date, self.end_date)?;
        if self.available_seats > self.total_seats {
            return Err(GatewayError::InvalidRequest(format!(
                "available seats ({}) cannot exceed total seats ({})",
                self.available_seats, self.total_seats
            )));
        }
        Ok(())
    }
}

/// Input for creating an event. Optional request fields are already
/// defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Owning theater.
    pub theater_id: String,
    /// Movie shown.
    pub movie_title: String,
    /// First screening day.
    pub start_date: NaiveDate,
    /// Last screening day.
    pub end_date: NaiveDate,
    /// Daily show times.
    pub show_times: Vec<String>,
    /// Price per ticket.
    pub ticket_price: u32,
    /// Description.
    pub description: String,
    /// Content hash of the event document.
    pub document_hash: Option<String>,
    /// Gateway URL of the event document.
    pub document_url: Option<String>,
    /// Seat capacity.
    pub total_seats: u32,
}

impl NewEvent {
    /// Validates the input against the creation rules.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if a required text field is
    /// blank, show times are empty, the price is outside
    /// [`MIN_TICKET_PRICE`]..=[`MAX_TICKET_PRICE`], the start date is before
    /// `today`, or the end date is before the start date.
    pub fn validate(&self, today: NaiveDate) -> Result<(), GatewayError> {
        if self.theater_id.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "theaterId is required".to_string(),
            ));
        }
        check_title(&self.movie_title)?;
        check_show_times(&self.show_times)?;
        check_price(self.ticket_price)?;
        if self.start_date < today {
            return Err(GatewayError::InvalidRequest(format!(
                "start date {} is in the past",
                self.start_date
            )));
        }
        check_date_order(self.start_date, self.end_date)?;
        check_capacity(self.total_seats)
    }

    /// Builds the stored record.
    #[must_use]
    pub fn into_event(self, id: EventId, now: DateTime<Utc>) -> Event {
        Event {
            id,
            theater_id: self.theater_id.trim().to_string(),
            movie_title: self.movie_title.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            show_times: self.show_times,
            ticket_price: self.ticket_price,
            description: self.description,
            document_hash: self.document_hash,
            document_url: self.document_url,
            status: EventStatus::Upcoming,
            available_seats: self.total_seats,
            total_seats: self.total_seats,
            cancellation_reason: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Shallow patch: every present field replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    /// New movie title.
    pub movie_title: Option<String>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
    /// New show times.
    pub show_times: Option<Vec<String>>,
    /// New ticket price.
    pub ticket_price: Option<u32>,
    /// New description.
    pub description: Option<String>,
    /// New document hash.
    pub document_hash: Option<String>,
    /// New document URL.
    pub document_url: Option<String>,
    /// New status.
    pub status: Option<EventStatus>,
    /// New available seat count.
    pub available_seats: Option<u32>,
    /// New seat capacity.
    pub total_seats: Option<u32>,
}

impl EventPatch {
    /// Applies the patch to `event` and bumps `updated_at`.
    pub fn apply(self, event: &mut Event, now: DateTime<Utc>) {
        if let Some(v) = self.movie_title {
            event.movie_title = v.trim().to_string();
        }
        if let Some(v) = self.start_date {
            event.start_date = v;
        }
        if let Some(v) = self.end_date {
            event.end_date = v;
        }
        if let Some(v) = self.show_times {
            event.show_times = v;
        }
        if let Some(v) = self.ticket_price {
            event.ticket_price = v;
        }
        if let Some(v) = self.description {
            event.description = v;
        }
        if let Some(v) = self.document_hash {
            event.document_hash = Some(v);
        }
        if let Some(v) = self.document_url {
            event.document_url = Some(v);
        }
        if let Some(v) = self.status {
            event.status = v;
        }
        if let Some(v) = self.available_seats {
            event.available_seats = v;
        }
        if let Some(v) = self.total_seats {
            event.total_seats = v;
        }
        event.updated_at = now;
    }
}

/// Aggregate counters over a set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    /// All events.
    pub total_events: usize,
    /// Status `upcoming`.
    pub upcoming_events: usize,
    /// Status `ongoing`.
    pub ongoing_events: usize,
    /// Status `completed`.
    pub completed_events: usize,
    /// Status `cancelled`.
    pub cancelled_events: usize,
    /// Tickets sold across non-cancelled events.
    pub total_tickets_sold: u64,
    /// Revenue across non-cancelled events.
    pub total_revenue: u64,
}

impl EventStats {
    /// Folds events into counters.
    pub fn collect<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        events.into_iter().fold(Self::default(), |mut stats, event| {
            stats.total_events += 1;
            match event.status {
                EventStatus::Upcoming => stats.upcoming_events += 1,
                EventStatus::Ongoing => stats.ongoing_events += 1,
                EventStatus::Completed => stats.completed_events += 1,
                EventStatus::Cancelled => stats.cancelled_events += 1,
            }
            if event.status != EventStatus::Cancelled {
                stats.total_tickets_sold += u64::from(event.tickets_sold());
                stats.total_revenue += event.revenue();
            }
            stats
        })
    }
}

fn check_title(title: &str) -> Result<(), GatewayError> {
    if title.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "movieTitle is required".to_string(),
        ));
    }
    Ok(())
}

fn check_capacity(total_seats: u32) -> Result<(), GatewayError> {
    if total_seats == 0 {
        return Err(GatewayError::InvalidRequest(
            "total seats must be positive".to_string(),
        ));
    }
    Ok(())
}

fn check_price(price: u32) -> Result<(), GatewayError> {
    if (MIN_TICKET_PRICE..=MAX_TICKET_PRICE).contains(&price) {
        Ok(())
    } else {
        Err(GatewayError::InvalidRequest(format!(
            "ticket price must be between {MIN_TICKET_PRICE} and {MAX_TICKET_PRICE}, got {price}"
        )))
    }
}

fn check_show_times(show_times: &[String]) -> Result<(), GatewayError> {
    if show_times.iter().all(|t| t.trim().is_empty()) {
        return Err(GatewayError::InvalidRequest(
            "at least one show time is required".to_string(),
        ));
    }
    Ok(())
}

fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), GatewayError> {
    if end < start {
        return Err(GatewayError::InvalidRequest(format!(
            "end date {end} must be on or after start date {start}"
        )));
    }
    Ok(())
}
