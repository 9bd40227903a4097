//! User-facing theater view assembled from owner-side records.
//!
//! Theaters are not stored here. A [`Theater`] is rebuilt on every catalogue
//! request from an approved [`TheaterApplication`], or synthesized for
//! theaters that only exist on-chain.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::application::TheaterApplication;
use super::document_text::DocumentFields;
use super::event::Event;
use super::phone::format_for_display;

/// Listing status of a theater.
pub const ACTIVE_STATUS: &str = "active";

/// A theater as shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Theater {
    /// Theater id (application id or on-chain id).
    pub id: String,
    /// Display name.
    pub name: String,
    /// 6-digit pincode.
    pub pincode: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Street address.
    pub address: String,
    /// Number of screens.
    pub screens: u32,
    /// Seats across all screens.
    pub total_seats: u32,
    /// Listing status.
    pub status: String,
    /// Owner name.
    pub owner_name: String,
    /// Owner email.
    pub owner_email: String,
    /// Owner phone, display formatted.
    pub owner_phone: String,
    /// Content hash of the theater document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_hash: Option<String>,
    /// Approximate distance from the query pincode; only set by proximity
    /// queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<u32>,
}

impl Theater {
    /// Builds a theater from the raw fields of an approved application.
    #[must_use]
    pub fn from_application(application: &TheaterApplication) -> Self {
        Self {
            id: application.id.theater_id(),
            name: application.theater_name.clone(),
            pincode: application.pincode.clone(),
            city: application.city.clone(),
            state: application.state.clone(),
            address: application.address.clone(),
            screens: application.screens,
            total_seats: application.total_seats,
            status: ACTIVE_STATUS.to_string(),
            owner_name: application.owner_name.clone(),
            owner_email: application.owner_email.clone(),
            owner_phone: format_for_display(&application.owner_phone),
            document_hash: application.document_hash.clone(),
            distance_km: None,
        }
    }

    /// Overrides fields with values extracted from the application document.
    /// Absent extracted fields leave the current values alone.
    pub fn apply_document_fields(&mut self, fields: DocumentFields) {
        if let Some(v) = fields.theater_name {
            self.name = v;
        }
        if let Some(v) = fields.pincode {
            self.pincode = v;
        }
        if let Some(v) = fields.city {
            self.city = v;
        }
        if let Some(v) = fields.state {
            self.state = v;
        }
        if let Some(v) = fields.address {
            self.address = v;
        }
        if let Some(v) = fields.screens.filter(|n| *n > 0) {
            self.screens = v;
        }
        if let Some(v) = fields.total_seats.filter(|n| *n > 0) {
            self.total_seats = v;
        }
        if let Some(v) = fields.owner_name {
            self.owner_name = v;
        }
        if let Some(v) = fields.email {
            self.owner_email = v;
        }
        if let Some(v) = fields.phone {
            self.owner_phone = format_for_display(&v);
        }
    }

    /// The fixed venue every on-chain theater is shown as.
    #[must_use]
    pub fn blockchain_sample_venue() -> Self {
        Self {
            id: "blockchain_sample_venue".to_string(),
            name: "BookMyBlock Chain Cinemas".to_string(),
            pincode: "517501".to_string(),
            city: "Tirupati".to_string(),
            state: "Andhra Pradesh".to_string(),
            address: "Tilak Road, Tirupati".to_string(),
            screens: 3,
            total_seats: 450,
            status: ACTIVE_STATUS.to_string(),
            owner_name: "BookMyBlock".to_string(),
            owner_email: "chain@bookmyblock.in".to_string(),
            owner_phone: format_for_display("9000000000"),
            document_hash: None,
            distance_km: None,
        }
    }
}

/// A theater together with its events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TheaterListing {
    /// The theater.
    #[serde(flatten)]
    pub theater: Theater,
    /// Its events.
    pub events: Vec<Event>,
}

impl TheaterListing {
    /// Returns `true` if `needle` (lowercase) occurs in the name, city,
    /// address, or any movie title.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let t = &self.theater;
        [&t.name, &t.city, &t.address, &t.state]
            .into_iter()
            .chain(self.events.iter().map(|e| &e.movie_title))
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::application::NewApplication;
    use crate::domain::document_text::extract_fields;
    use chrono::Utc;

    fn application() -> TheaterApplication {
        let input = NewApplication {
            theater_name: "Sandhya 70MM".to_string(),
            owner_name: "Venu".to_string(),
            owner_email: "venu@example.com".to_string(),
            owner_phone: "9876543210".to_string(),
            address: "RTC X Roads".to_string(),
            city: "Hyderabad".to_string(),
            state: "Telangana".to_string(),
            pincode: "500020".to_string(),
            screens: 2,
            total_seats: 500,
            document_hash: Some("QmHash".to_string()),
            document_text: None,
        };
        let Ok(app) = input.into_application(Utc::now()) else {
            panic!("valid application");
        };
        app
    }

    #[test]
    fn from_application_formats_phone() {
        let theater = Theater::from_application(&application());
        assert_eq!(theater.owner_phone, "98765 43210");
        assert_eq!(theater.status, ACTIVE_STATUS);
        assert_eq!(theater.document_hash.as_deref(), Some("QmHash"));
        assert!(theater.distance_km.is_none());
    }

    #[test]
    fn document_fields_override_raw_values() {
        let mut theater = Theater::from_application(&application());
        theater.apply_document_fields(extract_fields("City: Secunderabad\nTotal Seats: 520"));
        assert_eq!(theater.city, "Secunderabad");
        assert_eq!(theater.total_seats, 520);
        assert_eq!(theater.name, "Sandhya 70MM");
    }

    #[test]
    fn listing_text_match_includes_movies() {
        let listing = TheaterListing {
            theater: Theater::from_application(&application()),
            events: vec![],
        };
        assert!(listing.matches_text("sandhya"));
        assert!(listing.matches_text("hyderabad"));
        assert!(!listing.matches_text("pushpa"));
    }
}
