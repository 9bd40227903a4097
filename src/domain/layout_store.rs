//! Saved seat layouts, one per theater.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::seat_layout::TheaterSeatLayout;
use crate::error::GatewayError;

/// Theater id → most recently saved layout.
#[derive(Debug, Default)]
pub struct LayoutStore {
    layouts: RwLock<HashMap<String, TheaterSeatLayout>>,
}

impl LayoutStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and saves a layout, replacing any earlier one for the same
    /// theater. `last_updated` is set to now.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidLayout`] if the layout is
    /// inconsistent.
    pub async fn save(
        &self,
        mut layout: TheaterSeatLayout,
    ) -> Result<TheaterSeatLayout, GatewayError> {
        layout.validate()?;
        layout.last_updated = Utc::now();
        self.layouts
            .write()
            .await
            .insert(layout.theater_id.clone(), layout.clone());
        Ok(layout)
    }

    /// Returns the saved layout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LayoutNotFound`] if none was saved.
    pub async fn get(&self, theater_id: &str) -> Result<TheaterSeatLayout, GatewayError> {
        self.layouts
            .read()
            .await
            .get(theater_id)
            .cloned()
            .ok_or_else(|| GatewayError::LayoutNotFound(theater_id.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::seat_layout::generate_default_seat_layout;

    #[tokio::test]
    async fn save_then_get() {
        let store = LayoutStore::new();
        let Ok(layout) = generate_default_seat_layout("t1", "Galaxy", 1, 90) else {
            panic!("generation failed");
        };
        assert!(store.save(layout.clone()).await.is_ok());
        let Ok(saved) = store.get("t1").await else {
            panic!("layout missing");
        };
        assert_eq!(saved.screens, layout.screens);
    }

    #[tokio::test]
    async fn missing_layout_is_not_found() {
        let store = LayoutStore::new();
        assert!(matches!(
            store.get("nope").await,
            Err(GatewayError::LayoutNotFound(_))
        ));
    }

    #[tokio::test]
    async fn inconsistent_layout_is_rejected() {
        let store = LayoutStore::new();
        let Ok(mut layout) = generate_default_seat_layout("t1", "Galaxy", 2, 90) else {
            panic!("generation failed");
        };
        layout.screens.pop();
        assert!(matches!(
            store.save(layout).await,
            Err(GatewayError::InvalidLayout(_))
        ));
        assert!(store.get("t1").await.is_err());
    }
}
