//! Seat layout DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /api/layouts/generate`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLayoutRequest {
    /// Theater the preview is for.
    #[serde(default)]
    pub theater_id: String,
    /// Theater display name.
    #[serde(default)]
    pub theater_name: String,
    /// Number of screens (at least 1).
    #[serde(default)]
    pub screens: u32,
    /// Seats across all screens, split evenly (at most 20 000).
    #[schema(maximum = 20000)]
    #[serde(default)]
    pub total_seats: u32,
}
