//! Namespaced key-value storage for per-dashboard session data.
//!
//! The User, Owner and Admin dashboards share one backend but must never
//! read each other's sessions. Every key lives inside a [`Dashboard`]
//! namespace, and no operation crosses namespaces.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// The three front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Dashboard {
    /// Ticket buyers.
    User,
    /// Theater owners.
    Owner,
    /// Platform administrators.
    Admin,
}

impl Dashboard {
    /// Namespace prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dashboard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown dashboard: {other}")),
        }
    }
}

/// Key-value store partitioned by dashboard.
#[async_trait]
pub trait NamespacedStore: Send + Sync + fmt::Debug {
    /// Reads a value.
    async fn get(&self, namespace: Dashboard, key: &str) -> Option<String>;
    /// Writes a value, returning the previous one.
    async fn set(&self, namespace: Dashboard, key: &str, value: String) -> Option<String>;
    /// Deletes a value, returning it.
    async fn remove(&self, namespace: Dashboard, key: &str) -> Option<String>;
    /// Lists the keys of one namespace, sorted.
    async fn keys(&self, namespace: Dashboard) -> Vec<String>;
}

/// Process-local [`NamespacedStore`].
#[derive(Debug, Default)]
pub struct MemoryNamespacedStore {
    entries: RwLock<HashMap<(Dashboard, String), String>>,
}

impl MemoryNamespacedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NamespacedStore for MemoryNamespacedStore {
    async fn get(&self, namespace: Dashboard, key: &str) -> Option<String> {
        self.entries
            .read()
            .await
            .get(&(namespace, key.to_string()))
            .cloned()
    }

    async fn set(&self, namespace: Dashboard, key: &str, value: String) -> Option<String> {
        self.entries
            .write()
            .await
            .insert((namespace, key.to_string()), value)
    }

    async fn remove(&self, namespace: Dashboard, key: &str) -> Option<String> {
        self.entries
            .write()
            .await
            .remove(&(namespace, key.to_string()))
    }

    async fn keys(&self, namespace: Dashboard) -> Vec<String> {
        let map = self.entries.read().await;
        let mut keys: Vec<String> = map
            .keys()
            .filter(|(ns, _)| *ns == namespace)
            .map(|(_, key)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = MemoryNamespacedStore::new();
        store.set(Dashboard::User, "session", "u".to_string()).await;
        store.set(Dashboard::Admin, "session", "a".to_string()).await;

        assert_eq!(store.get(Dashboard::User, "session").await.as_deref(), Some("u"));
        assert_eq!(store.get(Dashboard::Admin, "session").await.as_deref(), Some("a"));
        assert_eq!(store.get(Dashboard::Owner, "session").await, None);

        assert_eq!(store.remove(Dashboard::User, "session").await.as_deref(), Some("u"));
        assert_eq!(store.get(Dashboard::Admin, "session").await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn keys_are_scoped_and_sorted() {
        let store = MemoryNamespacedStore::new();
        store.set(Dashboard::Owner, "b", String::new()).await;
        store.set(Dashboard::Owner, "a", String::new()).await;
        store.set(Dashboard::User, "c", String::new()).await;
        assert_eq!(store.keys(Dashboard::Owner).await, vec!["a", "b"]);
    }

    #[test]
    fn dashboard_parses() {
        assert_eq!("Owner".parse::<Dashboard>(), Ok(Dashboard::Owner));
        assert!("guest".parse::<Dashboard>().is_err());
    }
}
