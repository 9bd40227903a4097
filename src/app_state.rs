//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::{AuthService, MemoryNamespacedStore, MockTokenVerifier};
use crate::config::GatewayConfig;
use crate::domain::{ApplicationStore, EventStore, LayoutStore};
use crate::error::GatewayError;
use crate::service::{
    ApplicationService, EventService, HttpOwnerDirectory, LayoutService, LocalOwnerDirectory,
    OwnerDirectory, TheaterService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event CRUD, cancellation and statistics.
    pub event_service: Arc<EventService>,
    /// Theater registration and review.
    pub application_service: Arc<ApplicationService>,
    /// Seat-map previews and saved layouts.
    pub layout_service: Arc<LayoutService>,
    /// Aggregated theater catalogue.
    pub theater_service: Arc<TheaterService>,
    /// Token verification and dashboard sessions.
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires stores and services from configuration.
    ///
    /// Theater aggregation reads the owner service at `OWNER_SERVICE_URL`
    /// when set, and this process's own stores otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the owner-service client cannot
    /// be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let event_service =
            EventService::new(Arc::new(EventStore::new())).with_utc_offset(config.utc_offset());
        let application_service = ApplicationService::new(Arc::new(ApplicationStore::new()));
        let layout_service = LayoutService::new(Arc::new(LayoutStore::new()));

        let directory: Arc<dyn OwnerDirectory> = match &config.owner_service_url {
            Some(url) => {
                tracing::info!(%url, "theater aggregation reads remote owner service");
                Arc::new(HttpOwnerDirectory::new(
                    url.clone(),
                    config.owner_service_timeout(),
                )?)
            }
            None => {
                tracing::info!("theater aggregation reads local stores");
                Arc::new(LocalOwnerDirectory::new(
                    application_service.clone(),
                    event_service.clone(),
                ))
            }
        };
        let theater_service = TheaterService::new(directory, config.document_extraction_enabled);

        let auth_service = AuthService::new(
            Arc::new(MockTokenVerifier::new(
                config.mock_auth_subject.clone(),
                config.mock_auth_email.clone(),
            )),
            Arc::new(MemoryNamespacedStore::new()),
        );

        Ok(Self {
            event_service: Arc::new(event_service),
            application_service: Arc::new(application_service),
            layout_service: Arc::new(layout_service),
            theater_service: Arc::new(theater_service),
            auth_service: Arc::new(auth_service),
        })
    }
}
