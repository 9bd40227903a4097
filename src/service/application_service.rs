//! Application service: theater registration and admin review.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    ApplicationId, ApplicationStatus, ApplicationStore, NewApplication, TheaterApplication,
};
use crate::error::GatewayError;

/// Orchestration layer for theater applications.
#[derive(Debug, Clone)]
pub struct ApplicationService {
    store: Arc<ApplicationStore>,
}

impl ApplicationService {
    /// Creates a new `ApplicationService`.
    #[must_use]
    pub fn new(store: Arc<ApplicationStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a pending application.
    ///
    /// # Errors
    ///
    /// Returns a validation [`GatewayError`] if the submission is invalid.
    pub async fn submit(&self, input: NewApplication) -> Result<TheaterApplication, GatewayError> {
        let application = input.into_application(Utc::now())?;
        let application = self.store.insert(application).await?;
        tracing::info!(
            application_id = %application.id,
            theater = %application.theater_name,
            pincode = %application.pincode,
            "application submitted"
        );
        Ok(application)
    }

    /// Returns the application.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ApplicationNotFound`] if the id is unknown.
    pub async fn get(&self, id: ApplicationId) -> Result<TheaterApplication, GatewayError> {
        self.store.get(id).await
    }

    /// Lists applications, optionally by status.
    pub async fn list(&self, status: Option<ApplicationStatus>) -> Vec<TheaterApplication> {
        self.store.list(status).await
    }

    /// Approved applications only.
    pub async fn approved(&self) -> Vec<TheaterApplication> {
        self.store.list(Some(ApplicationStatus::Approved)).await
    }

    /// Approves a pending application.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ApplicationNotFound`] or
    /// [`GatewayError::Conflict`] if it was already reviewed.
    pub async fn approve(
        &self,
        id: ApplicationId,
        note: Option<String>,
    ) -> Result<TheaterApplication, GatewayError> {
        let application = self
            .store
            .review(id, ApplicationStatus::Approved, note)
            .await?;
        tracing::info!(application_id = %id, "application approved");
        Ok(application)
    }

    /// Rejects a pending application with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for a blank reason,
    /// [`GatewayError::ApplicationNotFound`], or [`GatewayError::Conflict`]
    /// if it was already reviewed.
    pub async fn reject(
        &self,
        id: ApplicationId,
        reason: &str,
    ) -> Result<TheaterApplication, GatewayError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "rejection reason is required".to_string(),
            ));
        }
        let application = self
            .store
            .review(id, ApplicationStatus::Rejected, Some(reason.to_string()))
            .await?;
        tracing::info!(application_id = %id, reason, "application rejected");
        Ok(application)
    }
}
