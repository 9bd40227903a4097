//! Authentication: pluggable token verification and per-dashboard sessions.
//!
//! [`AuthService`] verifies a bearer token with the configured
//! [`TokenVerifier`] and records the session in the caller's dashboard
//! namespace of a [`NamespacedStore`].

pub mod namespaced_store;
pub mod verifier;

use std::sync::Arc;

use chrono::Utc;

pub use namespaced_store::{Dashboard, MemoryNamespacedStore, NamespacedStore};
pub use verifier::{Identity, MockTokenVerifier, TokenVerifier};

use crate::error::GatewayError;

const SESSION_PREFIX: &str = "session:";

/// Verifies tokens and tracks sessions.
#[derive(Debug, Clone)]
pub struct AuthService {
    verifier: Arc<dyn TokenVerifier>,
    sessions: Arc<dyn NamespacedStore>,
}

impl AuthService {
    /// Creates a new `AuthService`.
    #[must_use]
    pub fn new(verifier: Arc<dyn TokenVerifier>, sessions: Arc<dyn NamespacedStore>) -> Self {
        Self { verifier, sessions }
    }

    /// Verifies `token` and records a session for `dashboard`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] if the verifier rejects the
    /// token.
    pub async fn authenticate(
        &self,
        dashboard: Dashboard,
        token: &str,
    ) -> Result<Identity, GatewayError> {
        let identity = self.verifier.verify(token).await.inspect_err(|e| {
            tracing::warn!(%dashboard, error = %e, "token rejected");
        })?;
        let key = format!("{SESSION_PREFIX}{}", identity.subject);
        let previous = self
            .sessions
            .set(dashboard, &key, Utc::now().to_rfc3339())
            .await;
        if previous.is_none() {
            tracing::info!(%dashboard, subject = %identity.subject, "session started");
        }
        Ok(identity)
    }

    /// Verifies `token` and drops its session for `dashboard`. Returns
    /// whether a session existed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] if the verifier rejects the
    /// token.
    pub async fn logout(&self, dashboard: Dashboard, token: &str) -> Result<bool, GatewayError> {
        let identity = self.verifier.verify(token).await?;
        let key = format!("{SESSION_PREFIX}{}", identity.subject);
        let existed = self.sessions.remove(dashboard, &key).await.is_some();
        tracing::info!(%dashboard, subject = %identity.subject, existed, "session ended");
        Ok(existed)
    }

    /// Subjects with an open session on `dashboard`.
    pub async fn active_subjects(&self, dashboard: Dashboard) -> Vec<String> {
        self.sessions
            .keys(dashboard)
            .await
            .into_iter()
            .filter_map(|k| k.strip_prefix(SESSION_PREFIX).map(str::to_string))
            .collect()
    }
}
