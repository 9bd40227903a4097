//! Token verification seam.
//!
//! The identity provider issues bearer tokens to the dashboards. This crate
//! never interprets them itself: a [`TokenVerifier`] turns a token into an
//! [`Identity`] or rejects it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::GatewayError;

/// The verified subject of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable subject identifier issued by the provider.
    pub subject: String,
    /// Email, if the provider shares it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Address of the provider-managed embedded wallet, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    /// Remaining provider claims.
    pub claims: BTreeMap<String, String>,
}

/// Verifies bearer tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync + std::fmt::Debug {
    /// Returns the identity behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] if the token is rejected.
    async fn verify(&self, token: &str) -> Result<Identity, GatewayError>;
}

/// Development verifier: any non-empty token maps to one fixed identity.
///
/// Do not deploy this; it performs no verification at all.
#[derive(Debug, Clone)]
pub struct MockTokenVerifier {
    identity: Identity,
}

impl MockTokenVerifier {
    /// Creates a verifier that always answers with `subject`/`email`.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: Option<String>) -> Self {
        let mut claims = BTreeMap::new();
        claims.insert("provider".to_string(), "mock".to_string());
        Self {
            identity: Identity {
                subject: subject.into(),
                email,
                wallet_address: None,
                claims,
            },
        }
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, GatewayError> {
        if token.trim().is_empty() {
            return Err(GatewayError::Unauthorized("empty token".to_string()));
        }
        Ok(self.identity.clone())
    }
}
