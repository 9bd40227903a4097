//! In-memory storage of theater applications.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::ApplicationId;
use super::application::{ApplicationStatus, TheaterApplication};
use crate::error::GatewayError;

/// Applications keyed by id. Listing returns submission order.
#[derive(Debug, Default)]
pub struct ApplicationStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    applications: HashMap<ApplicationId, TheaterApplication>,
    /// Ids in insertion order.
    order: Vec<ApplicationId>,
}

impl ApplicationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new application.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Conflict`] if the id is already taken
    /// (should never happen with UUID v4).
    pub async fn insert(
        &self,
        application: TheaterApplication,
    ) -> Result<TheaterApplication, GatewayError> {
        let mut inner = self.inner.write().await;
        if inner.applications.contains_key(&application.id) {
            return Err(GatewayError::Conflict(format!(
                "application {} already exists",
                application.id
            )));
        }
        inner.order.push(application.id);
        inner
            .applications
            .insert(application.id, application.clone());
        Ok(application)
    }

    /// Returns a copy of the application.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ApplicationNotFound`] if the id is unknown.
    pub async fn get(&self, id: ApplicationId) -> Result<TheaterApplication, GatewayError> {
        self.inner
            .read()
            .await
            .applications
            .get(&id)
            .cloned()
            .ok_or(GatewayError::ApplicationNotFound(id))
    }

    /// Lists applications in submission order, optionally by status.
    pub async fn list(&self, status: Option<ApplicationStatus>) -> Vec<TheaterApplication> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.applications.get(id))
            .filter(|a| status.is_none_or(|s| a.status == s))
            .cloned()
            .collect()
    }

    /// Moves a pending application to `Approved` or `Rejected`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ApplicationNotFound`] if the id is unknown
    /// and [`GatewayError::Conflict`] if the application was already
    /// reviewed.
    pub async fn review(
        &self,
        id: ApplicationId,
        decision: ApplicationStatus,
        note: Option<String>,
    ) -> Result<TheaterApplication, GatewayError> {
        if decision == ApplicationStatus::Pending {
            return Err(GatewayError::InvalidRequest(
                "a review must approve or reject".to_string(),
            ));
        }
        let mut inner = self.inner.write().await;
        let application = inner
            .applications
            .get_mut(&id)
            .ok_or(GatewayError::ApplicationNotFound(id))?;
        if application.status != ApplicationStatus::Pending {
            return Err(GatewayError::Conflict(format!(
                "application {id} is already {:?}",
                application.status
            )));
        }
        application.status = decision;
        application.review_note = note;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::application::NewApplication;

    fn application(name: &str) -> TheaterApplication {
        let input = NewApplication {
            theater_name: name.to_string(),
            owner_name: "Ravi".to_string(),
            owner_email: "ravi@example.com".to_string(),
            owner_phone: "9876543210".to_string(),
            address: "MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            screens: 1,
            total_seats: 150,
            document_hash: None,
            document_text: None,
        };
        let Ok(app) = input.into_application(Utc::now()) else {
            panic!("valid application");
        };
        app
    }

    #[tokio::test]
    async fn approve_then_list_approved() {
        let store = ApplicationStore::new();
        let Ok(a) = store.insert(application("A")).await else {
            panic!("insert failed");
        };
        let _ = store.insert(application("B")).await;

        let Ok(approved) = store.review(a.id, ApplicationStatus::Approved, None).await else {
            panic!("approve failed");
        };
        assert_eq!(approved.status, ApplicationStatus::Approved);

        let listed = store.list(Some(ApplicationStatus::Approved)).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(store.list(None).await.len(), 2);
    }

    #[tokio::test]
    async fn list_keeps_submission_order_on_equal_timestamps() {
        let store = ApplicationStore::new();
        let created_at = Utc::now();
        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D", "E", "F"] {
            let mut app = application(name);
            app.created_at = created_at;
            let Ok(stored) = store.insert(app).await else {
                panic!("insert failed");
            };
            ids.push(stored.id);
        }

        let listed: Vec<ApplicationId> = store.list(None).await.iter().map(|a| a.id).collect();
        assert_eq!(listed, ids);

        let Some(&third) = ids.get(2) else {
            panic!("six ids");
        };
        assert!(store.review(third, ApplicationStatus::Approved, None).await.is_ok());
        let pending: Vec<ApplicationId> = store
            .list(Some(ApplicationStatus::Pending))
            .await
            .iter()
            .map(|a| a.id)
            .collect();
        let expected: Vec<ApplicationId> = ids.into_iter().filter(|id| *id != third).collect();
        assert_eq!(pending, expected);
    }

    #[tokio::test]
    async fn second_review_conflicts() {
        let store = ApplicationStore::new();
        let Ok(a) = store.insert(application("A")).await else {
            panic!("insert failed");
        };
        let note = Some("incomplete license".to_string());
        assert!(store.review(a.id, ApplicationStatus::Rejected, note).await.is_ok());
        assert!(matches!(
            store.review(a.id, ApplicationStatus::Approved, None).await,
            Err(GatewayError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = ApplicationStore::new();
        let id = ApplicationId::generate();
        assert!(matches!(
            store.get(id).await,
            Err(GatewayError::ApplicationNotFound(_))
        ));
        assert!(matches!(
            store.review(id, ApplicationStatus::Approved, None).await,
            Err(GatewayError::ApplicationNotFound(_))
        ));
    }
}
