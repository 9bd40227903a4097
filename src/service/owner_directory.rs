//! Source of owner-side records for theater aggregation.
//!
//! The owner dashboard backend owns applications and events. Theater
//! aggregation reads them through an [`OwnerDirectory`]: over HTTP when the
//! owner service runs as a separate process ([`HttpOwnerDirectory`]), or
//! straight from this process's stores when it does not
//! ([`LocalOwnerDirectory`]).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ApplicationService, EventService};
use crate::domain::{Event, TheaterApplication};
use crate::error::GatewayError;

/// Read access to owner-side applications and events.
#[async_trait]
pub trait OwnerDirectory: Send + Sync + std::fmt::Debug {
    /// Approved theater applications.
    async fn approved_applications(&self) -> Result<Vec<TheaterApplication>, GatewayError>;

    /// Events of one theater.
    async fn theater_events(&self, theater_id: &str) -> Result<Vec<Event>, GatewayError>;

    /// Events visible to users (used to find on-chain theaters).
    async fn user_events(&self) -> Result<Vec<Event>, GatewayError>;
}

/// Success envelope as returned by the owner service.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// [`OwnerDirectory`] backed by the owner service's REST API.
#[derive(Debug, Clone)]
pub struct HttpOwnerDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOwnerDirectory {
    /// Creates a client for `base_url` with a fixed per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(format!("GET {url}: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Upstream(format!("GET {url}: status {status}")));
        }
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("GET {url}: bad body: {e}")))?;
        match envelope {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Envelope { message, .. } => Err(GatewayError::Upstream(format!(
                "GET {url}: {}",
                message.unwrap_or_else(|| "request failed".to_string())
            ))),
        }
    }
}

#[async_trait]
impl OwnerDirectory for HttpOwnerDirectory {
    async fn approved_applications(&self) -> Result<Vec<TheaterApplication>, GatewayError> {
        self.fetch("/api/theater-applications/approved").await
    }

    async fn theater_events(&self, theater_id: &str) -> Result<Vec<Event>, GatewayError> {
        let safe = theater_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if theater_id.is_empty() || !safe {
            return Err(GatewayError::InvalidRequest(format!(
                "invalid theater id: {theater_id}"
            )));
        }
        self.fetch(&format!("/api/events/theater/{theater_id}")).await
    }

    async fn user_events(&self) -> Result<Vec<Event>, GatewayError> {
        self.fetch("/api/events/user").await
    }
}

/// [`OwnerDirectory`] reading this process's own stores.
#[derive(Debug, Clone)]
pub struct LocalOwnerDirectory {
    applications: ApplicationService,
    events: EventService,
}

impl LocalOwnerDirectory {
    /// Creates a directory over the given services.
    #[must_use]
    pub fn new(applications: ApplicationService, events: EventService) -> Self {
        Self {
            applications,
            events,
        }
    }
}

#[async_trait]
impl OwnerDirectory for LocalOwnerDirectory {
    async fn approved_applications(&self) -> Result<Vec<TheaterApplication>, GatewayError> {
        Ok(self.applications.approved().await)
    }

    async fn theater_events(&self, theater_id: &str) -> Result<Vec<Event>, GatewayError> {
        Ok(self.events.events_by_theater(theater_id).await)
    }

    async fn user_events(&self) -> Result<Vec<Event>, GatewayError> {
        Ok(self.events.user_events().await)
    }
}
