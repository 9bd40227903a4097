//! Type-safe identifiers.
//!
//! [`EventId`] is the sequential integer assigned by the event store;
//! [`ApplicationId`] wraps a UUID v4 and doubles as the theater id once the
//! application is approved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a screening event.
///
/// Assigned by the store in creation order starting at 1 and never reused
/// while the process lives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Identifier of a theater application, a random UUID.
///
/// Once the application is approved the same value, in its hyphenated
/// string form, is the theater's id in events and the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ApplicationId(uuid::Uuid);

impl ApplicationId {
    /// Draws a fresh id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// The theater id this application is listed under once approved.
    #[must_use]
    pub fn theater_id(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for ApplicationId {
    type Err = uuid::Error;

    /// Accepts any UUID spelling (hyphenated, simple, braced, URN).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim()).map(Self)
    }
}
