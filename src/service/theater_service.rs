//! Theater aggregation: builds the user-facing catalogue from owner-side
//! records on every request.
//!
//! Aggregation is best effort. Each upstream read can fail on its own and
//! only removes what it would have contributed:
//!
//! 1. approved applications; on failure there are no application theaters
//! 2. each theater's events; on failure that theater is dropped
//! 3. on-chain events; on failure there is no on-chain venue
//!
//! Nothing is retried.

use std::sync::Arc;

use serde::Deserialize;
use tokio::task::JoinSet;
use utoipa::IntoParams;

use super::owner_directory::OwnerDirectory;
use crate::domain::document_text::extract_fields;
use crate::domain::pincode::{
    approximate_distance_km, is_pincode_nearby, is_valid_pincode, pincode_for_city,
};
use crate::domain::{Event, Theater, TheaterApplication, TheaterListing};
use crate::error::GatewayError;

/// Filters for [`TheaterService::search`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TheaterQuery {
    /// Free text matched against name, city, address, state and movie titles.
    pub q: Option<String>,
    /// City name (case-insensitive substring).
    pub city: Option<String>,
    /// 6-digit pincode; keeps nearby theaters and sorts by distance.
    pub pincode: Option<String>,
}

/// Read-only catalogue of theaters and their events.
#[derive(Debug, Clone)]
pub struct TheaterService {
    directory: Arc<dyn OwnerDirectory>,
    document_extraction: bool,
}

impl TheaterService {
    /// Creates a new `TheaterService`.
    ///
    /// With `document_extraction` set, fields extracted from an application's
    /// document text override its raw fields.
    #[must_use]
    pub fn new(directory: Arc<dyn OwnerDirectory>, document_extraction: bool) -> Self {
        Self {
            directory,
            document_extraction,
        }
    }

    /// Every theater with its events.
    pub async fn all_theaters(&self) -> Vec<TheaterListing> {
        let mut listings = self.application_theaters().await;
        if let Some(venue) = self.blockchain_venue().await {
            listings.push(venue);
        }
        tracing::debug!(count = listings.len(), "theaters aggregated");
        listings
    }

    /// Theaters near `pincode`, closest first, with `distanceKm` set.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidPincode`] unless `pincode` is six
    /// digits.
    pub async fn theaters_near(&self, pincode: &str) -> Result<Vec<TheaterListing>, GatewayError> {
        let pincode = pincode.trim();
        if !is_valid_pincode(pincode) {
            return Err(GatewayError::InvalidPincode(pincode.to_string()));
        }
        Ok(near(self.all_theaters().await, pincode))
    }

    /// Theaters in a city: same city name, or near the city's reference
    /// pincode when the city is known.
    pub async fn theaters_in_city(&self, city: &str) -> Vec<TheaterListing> {
        let name = city.trim().to_lowercase();
        if name.is_empty() {
            return Vec::new();
        }
        let reference = pincode_for_city(&name);
        let mut listings: Vec<TheaterListing> = self
            .all_theaters()
            .await
            .into_iter()
            .filter_map(|mut listing| {
                let same_city = listing.theater.city.to_lowercase() == name;
                let nearby =
                    reference.is_some_and(|p| is_pincode_nearby(&listing.theater.pincode, p));
                if !same_city && !nearby {
                    return None;
                }
                listing.theater.distance_km =
                    reference.and_then(|p| approximate_distance_km(&listing.theater.pincode, p));
                Some(listing)
            })
            .collect();
        listings.sort_by_key(|l| l.theater.distance_km.unwrap_or(u32::MAX));
        listings
    }

    /// Free-text search with optional city and pincode filters.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidPincode`] if a pincode filter is given
    /// and is not six digits.
    pub async fn search(&self, query: &TheaterQuery) -> Result<Vec<TheaterListing>, GatewayError> {
        let pincode = query
            .pincode
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        if let Some(p) = pincode.filter(|p| !is_valid_pincode(p)) {
            return Err(GatewayError::InvalidPincode(p.to_string()));
        }
        let text = normalized(query.q.as_deref());
        let city = normalized(query.city.as_deref());

        let listings: Vec<TheaterListing> = self
            .all_theaters()
            .await
            .into_iter()
            .filter(|l| text.as_deref().is_none_or(|t| l.matches_text(t)))
            .filter(|l| {
                city.as_deref()
                    .is_none_or(|c| l.theater.city.to_lowercase().contains(c))
            })
            .collect();

        Ok(match pincode {
            Some(p) => near(listings, p),
            None => listings,
        })
    }

    /// Events of theaters near `pincode`, closest theater first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidPincode`] unless `pincode` is six
    /// digits.
    pub async fn events_near(&self, pincode: &str) -> Result<Vec<Event>, GatewayError> {
        Ok(self
            .theaters_near(pincode)
            .await?
            .into_iter()
            .flat_map(|l| l.events)
            .collect())
    }

    async fn application_theaters(&self) -> Vec<TheaterListing> {
        let applications = match self.directory.approved_applications().await {
            Ok(applications) => applications,
            Err(e) => {
                tracing::warn!(error = %e, "approved applications unavailable");
                return Vec::new();
            }
        };

        let mut tasks = JoinSet::new();
        for (index, application) in applications.into_iter().enumerate() {
            let theater = self.theater_from(&application);
            let directory = Arc::clone(&self.directory);
            tasks.spawn(async move {
                let events = directory.theater_events(&theater.id).await;
                (index, theater, events)
            });
        }

        let mut listings = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, theater, Ok(events))) => {
                    listings.push((index, TheaterListing { theater, events }));
                }
                Ok((_, theater, Err(e))) => {
                    tracing::warn!(
                        theater_id = %theater.id,
                        error = %e,
                        "theater dropped: events unavailable"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "theater aggregation task failed");
                }
            }
        }
        listings.sort_by_key(|(index, _)| *index);
        listings.into_iter().map(|(_, listing)| listing).collect()
    }

    async fn blockchain_venue(&self) -> Option<TheaterListing> {
        let events = match self.directory.user_events().await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "on-chain events unavailable");
                return None;
            }
        };
        let events: Vec<Event> = events
            .into_iter()
            .filter(Event::is_blockchain_tagged)
            .collect();
        if events.is_empty() {
            return None;
        }
        Some(TheaterListing {
            theater: Theater::blockchain_sample_venue(),
            events,
        })
    }

    fn theater_from(&self, application: &TheaterApplication) -> Theater {
        let mut theater = Theater::from_application(application);
        if self.document_extraction {
            if let Some(text) = application.document_text.as_deref() {
                let fields = extract_fields(text);
                tracing::debug!(
                    theater_id = %theater.id,
                    found = fields.found(),
                    "document fields extracted"
                );
                theater.apply_document_fields(fields);
            }
        }
        theater
    }
}

/// Keeps listings near `pincode`, sets their distance, closest first.
fn near(listings: Vec<TheaterListing>, pincode: &str) -> Vec<TheaterListing> {
    let mut nearby: Vec<TheaterListing> = listings
        .into_iter()
        .filter(|l| is_pincode_nearby(&l.theater.pincode, pincode))
        .map(|mut l| {
            l.theater.distance_km = approximate_distance_km(&l.theater.pincode, pincode);
            l
        })
        .collect();
    nearby.sort_by_key(|l| l.theater.distance_km.unwrap_or(u32::MAX));
    nearby
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
