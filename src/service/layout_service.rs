//! Layout service: seat-map previews, saved layouts, and seat lookup.

use std::sync::Arc;

use crate::domain::LayoutStore;
use crate::domain::seat_layout::{PricedSeat, TheaterSeatLayout, generate_default_seat_layout};
use crate::error::GatewayError;

/// Orchestration layer for seat layouts.
#[derive(Debug, Clone)]
pub struct LayoutService {
    store: Arc<LayoutStore>,
}

impl LayoutService {
    /// Creates a new `LayoutService`.
    #[must_use]
    pub fn new(store: Arc<LayoutStore>) -> Self {
        Self { store }
    }

    /// Generates a preview layout. Nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidLayout`] for zero screens or too few
    /// seats.
    pub fn preview(
        &self,
        theater_id: &str,
        theater_name: &str,
        screens: u32,
        total_seats: u32,
    ) -> Result<TheaterSeatLayout, GatewayError> {
        if theater_id.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "theaterId is required".to_string(),
            ));
        }
        let layout = generate_default_seat_layout(theater_id, theater_name, screens, total_seats)?;
        tracing::debug!(
            theater_id,
            screens,
            seats = layout.seat_count(),
            "layout preview generated"
        );
        Ok(layout)
    }

    /// Saves the layout for `theater_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the body names a different
    /// theater, or [`GatewayError::InvalidLayout`] if it is inconsistent.
    pub async fn save(
        &self,
        theater_id: &str,
        layout: TheaterSeatLayout,
    ) -> Result<TheaterSeatLayout, GatewayError> {
        if layout.theater_id != theater_id {
            return Err(GatewayError::InvalidRequest(format!(
                "layout is for theater {} but was sent to {theater_id}",
                layout.theater_id
            )));
        }
        let saved = self.store.save(layout).await?;
        tracing::info!(
            theater_id,
            screens = saved.total_screens,
            seats = saved.seat_count(),
            "layout saved"
        );
        Ok(saved)
    }

    /// Returns the saved layout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LayoutNotFound`] if none was saved.
    pub async fn get(&self, theater_id: &str) -> Result<TheaterSeatLayout, GatewayError> {
        self.store.get(theater_id).await
    }

    /// Looks up one seat of a saved layout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::LayoutNotFound`] if no layout was saved and
    /// [`GatewayError::SeatNotFound`] if the seat does not exist.
    pub async fn seat(
        &self,
        theater_id: &str,
        screen_id: &str,
        row: &str,
        number: u32,
    ) -> Result<PricedSeat, GatewayError> {
        self.store
            .get(theater_id)
            .await?
            .find_seat(screen_id, row, number)
            .ok_or_else(|| {
                GatewayError::SeatNotFound(format!("{theater_id}/{screen_id}/{row}{number}"))
            })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::seat_layout::LayoutError;

    fn service() -> LayoutService {
        LayoutService::new(Arc::new(LayoutStore::new()))
    }

    #[test]
    fn preview_rejects_zero_screens() {
        assert!(matches!(
            service().preview("t1", "Galaxy", 0, 100),
            Err(GatewayError::InvalidLayout(_))
        ));
    }

    #[test]
    fn preview_rejects_oversized_theater() {
        let Err(err) = service().preview("t1", "Galaxy", 1, u32::MAX) else {
            panic!("oversized preview should fail");
        };
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert!(matches!(
            err,
            GatewayError::InvalidLayout(LayoutError::TooManySeats { .. })
        ));
    }

    #[tokio::test]
    async fn save_requires_matching_theater() {
        let svc = service();
        let Ok(layout) = svc.preview("t1", "Galaxy", 1, 30) else {
            panic!("preview failed");
        };
        assert!(matches!(
            svc.save("t2", layout.clone()).await,
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(svc.save("t1", layout).await.is_ok());
    }

    #[tokio::test]
    async fn seat_lookup_returns_price() {
        let svc = service();
        let Ok(layout) = svc.preview("t1", "Galaxy", 1, 150) else {
            panic!("preview failed");
        };
        assert!(svc.save("t1", layout).await.is_ok());

        let Ok(front) = svc.seat("t1", "screen-1", "A", 1).await else {
            panic!("seat A1 missing");
        };
        assert_eq!(front.price, 350);
        let Ok(back) = svc.seat("t1", "screen-1", "j", 15).await else {
            panic!("seat J15 missing");
        };
        assert_eq!(back.price, 100);
        assert!(matches!(
            svc.seat("t1", "screen-1", "Z", 1).await,
            Err(GatewayError::SeatNotFound(_))
        ));
        assert!(matches!(
            svc.seat("t9", "screen-1", "A", 1).await,
            Err(GatewayError::LayoutNotFound(_))
        ));
    }
}
