//! Seat maps, pricing tiers, and the default layout generator.
//!
//! A theater's seats are split evenly across its screens. Each screen is laid
//! out in rows of at most [`MAX_SEATS_PER_ROW`] seats, and every row belongs
//! to a pricing tier chosen by its distance from the back of the hall:
//! the first rows are the most expensive.
//!
//! Availability in a generated layout is a random draw per seat. It is a
//! preview only and never authoritative inventory.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Target number of seats in one row.
pub const MAX_SEATS_PER_ROW: u32 = 15;

/// Largest seat count a single layout request may ask for.
pub const MAX_TOTAL_SEATS: u32 = 20_000;

/// Probability that a generated seat is shown as available.
pub const PREVIEW_AVAILABILITY: f64 = 0.85;

/// Position tag of generated screens (the screen is drawn at the top of
/// the map).
pub const DEFAULT_SCREEN_POSITION: &str = "top";

/// Reasons a layout cannot be generated or saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Screen count was zero.
    #[error("a theater needs at least one screen")]
    NoScreens,
    /// Not enough seats to give every screen at least one.
    #[error("{total_seats} seats cannot be split across {screens} screens")]
    NotEnoughSeats {
        /// Requested screen count.
        screens: u32,
        /// Requested seat count.
        total_seats: u32,
    },
    /// More seats requested than [`MAX_TOTAL_SEATS`].
    #[error("{total_seats} seats exceeds the limit of {max}")]
    TooManySeats {
        /// Requested seat count.
        total_seats: u32,
        /// Upper bound.
        max: u32,
    },
    /// A saved layout is internally inconsistent.
    #[error("invalid layout: {0}")]
    Inconsistent(String),
}

/// The five fixed pricing tiers, most desirable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeatTier {
    /// Rows 0–1.
    Recliner,
    /// Rows 2–3.
    Vip,
    /// Rows 4–5.
    Platinum,
    /// Rows 6–7.
    Gold,
    /// Row 8 onwards.
    Silver,
}

impl SeatTier {
    /// All tiers in descending price order.
    pub const ALL: [Self; 5] = [
        Self::Recliner,
        Self::Vip,
        Self::Platinum,
        Self::Gold,
        Self::Silver,
    ];

    /// Tier for a zero-based row index.
    #[must_use]
    pub const fn for_row(row_index: u32) -> Self {
        match row_index {
            0..2 => Self::Recliner,
            2..4 => Self::Vip,
            4..6 => Self::Platinum,
            6..8 => Self::Gold,
            _ => Self::Silver,
        }
    }

    /// Stable identifier used in [`SeatInfo::category`].
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Recliner => "recliner",
            Self::Vip => "vip",
            Self::Platinum => "platinum",
            Self::Gold => "gold",
            Self::Silver => "silver",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Recliner => "Recliner",
            Self::Vip => "VIP",
            Self::Platinum => "Platinum",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
        }
    }

    /// Hex color used by the seat map UI.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Recliner => "#8B5CF6",
            Self::Vip => "#EF4444",
            Self::Platinum => "#6B7280",
            Self::Gold => "#F59E0B",
            Self::Silver => "#9CA3AF",
        }
    }

    /// Ticket price in rupees.
    #[must_use]
    pub const fn price(self) -> u32 {
        match self {
            Self::Recliner => 350,
            Self::Vip => 250,
            Self::Platinum => 200,
            Self::Gold => 150,
            Self::Silver => 100,
        }
    }
}

/// A pricing tier as it appears on one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatCategory {
    /// Tier identifier (e.g. `"vip"`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hex color.
    pub color: String,
    /// Price per seat.
    pub price: u32,
    /// Seats of this tier on the screen.
    pub seat_count: u32,
}

impl SeatCategory {
    fn from_tier(tier: SeatTier, seat_count: u32) -> Self {
        Self {
            id: tier.id().to_string(),
            name: tier.display_name().to_string(),
            color: tier.color().to_string(),
            price: tier.price(),
            seat_count,
        }
    }
}

/// A single seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatInfo {
    /// `{theater}-{screen}-{row}{number}`.
    pub id: String,
    /// Row label (`A`, `B`, …, `AA`).
    pub row: String,
    /// One-based seat number within the row.
    pub number: u32,
    /// Tier identifier.
    pub category: String,
    /// Shown as available.
    pub is_available: bool,
    /// Held back from sale.
    pub is_blocked: bool,
}

/// One row of a seat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatRow {
    /// Row label.
    pub row: String,
    /// Tier identifier of every seat in the row.
    pub category: String,
    /// Seats, left to right.
    pub seats: Vec<SeatInfo>,
}

/// The seat grid of one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapData {
    /// Number of rows.
    pub row_count: u32,
    /// Seats in a full row.
    pub seats_per_row: u32,
    /// Rows, front (most expensive) first.
    pub rows: Vec<SeatRow>,
}

/// Layout of one screen (auditorium).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenLayout {
    /// Screen identifier (`screen-1`, …).
    pub screen_id: String,
    /// Display name.
    pub screen_name: String,
    /// Where the screen is drawn on the map.
    pub position: String,
    /// Seats on this screen.
    pub total_seats: u32,
    /// Tiers present on this screen.
    pub categories: Vec<SeatCategory>,
    /// Seat grid.
    pub seat_map: SeatMapData,
}

impl ScreenLayout {
    /// Iterates every seat on the screen.
    pub fn seats(&self) -> impl Iterator<Item = &SeatInfo> {
        self.seat_map.rows.iter().flat_map(|row| row.seats.iter())
    }

    /// Seats shown as available and not blocked.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.seats()
            .filter(|seat| seat.is_available && !seat.is_blocked)
            .count()
    }

    /// Price of a category on this screen.
    #[must_use]
    pub fn price_of(&self, category: &str) -> Option<u32> {
        self.categories
            .iter()
            .find(|c| c.id == category)
            .map(|c| c.price)
    }
}

/// Full seat layout of a theater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TheaterSeatLayout {
    /// Theater identifier.
    pub theater_id: String,
    /// Theater name.
    pub theater_name: String,
    /// Number of screens.
    pub total_screens: u32,
    /// Screens in order.
    pub screens: Vec<ScreenLayout>,
    /// Last modification time.
    pub last_updated: DateTime<Utc>,
    /// Content hash of the pinned layout document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// A seat together with its price, as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricedSeat {
    /// Screen the seat is on.
    pub screen_id: String,
    /// The seat.
    pub seat: SeatInfo,
    /// Price of the seat's tier on that screen.
    pub price: u32,
}

impl TheaterSeatLayout {
    /// Looks up a seat by screen, row label and seat number.
    #[must_use]
    pub fn find_seat(&self, screen_id: &str, row: &str, number: u32) -> Option<PricedSeat> {
        let screen = self.screens.iter().find(|s| s.screen_id == screen_id)?;
        let seat = screen
            .seats()
            .find(|seat| seat.row.eq_ignore_ascii_case(row) && seat.number == number)?;
        let price = screen.price_of(&seat.category)?;
        Some(PricedSeat {
            screen_id: screen.screen_id.clone(),
            seat: seat.clone(),
            price,
        })
    }

    /// Seats across all screens.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.screens.iter().map(|s| s.seats().count()).sum()
    }

    /// Checks the structural invariants of a layout supplied by a client.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Inconsistent`] if there are no screens, the
    /// screen count disagrees with `total_screens`, screen ids repeat, or a
    /// seat refers to a category its screen does not define.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.screens.is_empty() {
            return Err(LayoutError::NoScreens);
        }
        if usize::try_from(self.total_screens).ok() != Some(self.screens.len()) {
            return Err(LayoutError::Inconsistent(format!(
                "totalScreens is {} but {} screens were given",
                self.total_screens,
                self.screens.len()
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for screen in &self.screens {
            if !seen.insert(screen.screen_id.as_str()) {
                return Err(LayoutError::Inconsistent(format!(
                    "duplicate screen id {}",
                    screen.screen_id
                )));
            }
            if let Some(seat) = screen
                .seats()
                .find(|seat| screen.price_of(&seat.category).is_none())
            {
                return Err(LayoutError::Inconsistent(format!(
                    "seat {} uses unknown category {}",
                    seat.id, seat.category
                )));
            }
        }
        Ok(())
    }
}

/// Spreadsheet-style row label: 0 → `A`, 25 → `Z`, 26 → `AA`.
#[must_use]
pub fn row_label(index: u32) -> String {
    let mut label = Vec::new();
    let mut n = index;
    loop {
        let letter = b'A' + u8::try_from(n % 26).unwrap_or(0);
        label.push(char::from(letter));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.iter().rev().collect()
}

/// Row geometry for a screen: `(rows, seats_per_row)`.
#[must_use]
pub const fn grid_for(seats_per_screen: u32) -> (u32, u32) {
    if seats_per_screen == 0 {
        return (0, 0);
    }
    let rows = seats_per_screen.div_ceil(MAX_SEATS_PER_ROW);
    (rows, seats_per_screen.div_ceil(rows))
}

/// Generates a default layout using the thread-local RNG for availability.
///
/// # Errors
///
/// See [`generate_default_seat_layout_with`].
pub fn generate_default_seat_layout(
    theater_id: &str,
    theater_name: &str,
    screens: u32,
    total_seats: u32,
) -> Result<TheaterSeatLayout, LayoutError> {
    generate_default_seat_layout_with(
        &mut rand::thread_rng(),
        theater_id,
        theater_name,
        screens,
        total_seats,
    )
}

/// Generates a default layout drawing availability from `rng`.
///
/// Seats are split evenly (remainder dropped) across screens; each screen is
/// filled row by row until its share is reached.
///
/// # Errors
///
/// Returns [`LayoutError::NoScreens`] if `screens` is zero and
/// [`LayoutError::NotEnoughSeats`] if a screen would get no seats,
/// [`LayoutError::TooManySeats`] above [`MAX_TOTAL_SEATS`].
pub fn generate_default_seat_layout_with<R: Rng + ?Sized>(
    rng: &mut R,
    theater_id: &str,
    theater_name: &str,
    screens: u32,
    total_seats: u32,
) -> Result<TheaterSeatLayout, LayoutError> {
    if screens == 0 {
        return Err(LayoutError::NoScreens);
    }
    if total_seats > MAX_TOTAL_SEATS {
        return Err(LayoutError::TooManySeats {
            total_seats,
            max: MAX_TOTAL_SEATS,
        });
    }
    let seats_per_screen = total_seats / screens;
    if seats_per_screen == 0 {
        return Err(LayoutError::NotEnoughSeats {
            screens,
            total_seats,
        });
    }

    let layouts = (1..=screens)
        .map(|n| generate_screen(rng, theater_id, n, seats_per_screen))
        .collect();

    Ok(TheaterSeatLayout {
        theater_id: theater_id.to_string(),
        theater_name: theater_name.to_string(),
        total_screens: screens,
        screens: layouts,
        last_updated: Utc::now(),
        content_hash: None,
    })
}

fn generate_screen<R: Rng + ?Sized>(
    rng: &mut R,
    theater_id: &str,
    screen_number: u32,
    seats_per_screen: u32,
) -> ScreenLayout {
    let screen_id = format!("screen-{screen_number}");
    let (row_count, seats_per_row) = grid_for(seats_per_screen);

    let mut remaining = seats_per_screen;
    let mut rows = Vec::with_capacity(row_count as usize);
    let mut tier_counts = [0u32; SeatTier::ALL.len()];

    for row_index in 0..row_count {
        let in_row = remaining.min(seats_per_row);
        if in_row == 0 {
            break;
        }
        remaining -= in_row;

        let tier = SeatTier::for_row(row_index);
        if let Some(count) = SeatTier::ALL
            .iter()
            .position(|t| *t == tier)
            .and_then(|i| tier_counts.get_mut(i))
        {
            *count += in_row;
        }

        let label = row_label(row_index);
        let seats = (1..=in_row)
            .map(|number| SeatInfo {
                id: format!("{theater_id}-{screen_id}-{label}{number}"),
                row: label.clone(),
                number,
                category: tier.id().to_string(),
                is_available: rng.gen_bool(PREVIEW_AVAILABILITY),
                is_blocked: false,
            })
            .collect();

        rows.push(SeatRow {
            row: label,
            category: tier.id().to_string(),
            seats,
        });
    }

    let categories = SeatTier::ALL
        .iter()
        .zip(tier_counts)
        .filter(|(_, count)| *count > 0)
        .map(|(tier, count)| SeatCategory::from_tier(*tier, count))
        .collect();

    ScreenLayout {
        screen_name: format!("Screen {screen_number}"),
        screen_id,
        position: DEFAULT_SCREEN_POSITION.to_string(),
        total_seats: seats_per_screen,
        categories,
        seat_map: SeatMapData {
            row_count,
            seats_per_row,
            rows,
        },
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layout(screens: u32, total_seats: u32) -> TheaterSeatLayout {
        let mut rng = StdRng::seed_from_u64(7);
        let Ok(layout) =
            generate_default_seat_layout_with(&mut rng, "t1", "Galaxy", screens, total_seats)
        else {
            panic!("layout generation failed");
        };
        layout
    }

    #[test]
    fn single_screen_of_150() {
        let layout = layout(1, 150);
        assert_eq!(layout.total_screens, 1);
        let screen = &layout.screens[0];
        assert_eq!(screen.seat_map.row_count, 10);
        assert_eq!(screen.seat_map.seats_per_row, 15);
        assert_eq!(screen.seats().count(), 150);

        let first = &screen.seat_map.rows[0].seats[0];
        let last_row = &screen.seat_map.rows[9];
        assert_eq!(screen.price_of(&first.category), Some(350));
        assert_eq!(screen.price_of(&last_row.category), Some(100));
    }

    #[test]
    fn row_prices_never_increase() {
        let layout = layout(1, 150);
        let screen = &layout.screens[0];
        let prices: Vec<u32> = screen
            .seat_map
            .rows
            .iter()
            .filter_map(|row| screen.price_of(&row.category))
            .collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(prices.first(), Some(&350));
        assert_eq!(prices.last(), Some(&100));
    }

    #[test]
    fn uneven_split_never_exceeds_share() {
        // 100 seats: 7 rows of up to 15, last row short.
        let layout = layout(1, 100);
        let screen = &layout.screens[0];
        assert_eq!(screen.seat_map.row_count, 7);
        assert_eq!(screen.seats().count(), 100);
        assert_eq!(screen.seat_map.rows[6].seats.len(), 10);

        // 250 seats over 3 screens: 83 each, remainder dropped.
        let split = self::layout(3, 250);
        assert_eq!(split.screens.len(), 3);
        for screen in &split.screens {
            assert_eq!(screen.total_seats, 83);
            assert!(screen.seats().count() <= 83);
        }
        assert!(split.seat_count() <= 250);
    }

    #[test]
    fn category_counts_sum_to_screen_seats() {
        let layout = layout(2, 300);
        for screen in &layout.screens {
            let sum: u32 = screen.categories.iter().map(|c| c.seat_count).sum();
            assert_eq!(sum as usize, screen.seats().count());
        }
    }

    #[test]
    fn small_screen_only_has_front_tiers() {
        let layout = layout(1, 20);
        let ids: Vec<&str> = layout.screens[0]
            .categories
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["recliner"]);
    }

    #[test]
    fn seat_ids_are_stable_and_unique() {
        let layout = layout(2, 60);
        let mut ids = std::collections::HashSet::new();
        for screen in &layout.screens {
            for seat in screen.seats() {
                assert!(seat.id.starts_with("t1-screen-"));
                assert!(!seat.is_blocked);
                assert!(ids.insert(seat.id.clone()));
            }
        }
        assert_eq!(
            layout.screens[1].seat_map.rows[0].seats[0].id,
            "t1-screen-2-A1"
        );
    }

    #[test]
    fn structure_is_repeatable_across_draws() {
        let a = generate_default_seat_layout("t1", "Galaxy", 2, 120);
        let b = generate_default_seat_layout("t1", "Galaxy", 2, 120);
        let (Ok(a), Ok(b)) = (a, b) else {
            panic!("layout generation failed");
        };
        let ids = |l: &TheaterSeatLayout| -> Vec<String> {
            l.screens
                .iter()
                .flat_map(|s| s.seats().map(|seat| seat.id.clone()).collect::<Vec<_>>())
                .collect()
        };
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(
            generate_default_seat_layout("t1", "Galaxy", 0, 100),
            Err(LayoutError::NoScreens)
        );
        assert!(matches!(
            generate_default_seat_layout("t1", "Galaxy", 5, 3),
            Err(LayoutError::NotEnoughSeats { .. })
        ));
    }

    #[test]
    fn seat_count_is_capped() {
        let at_cap = layout(4, MAX_TOTAL_SEATS);
        assert_eq!(at_cap.seat_count(), MAX_TOTAL_SEATS as usize);

        assert_eq!(
            generate_default_seat_layout("t1", "Galaxy", 1, MAX_TOTAL_SEATS + 1),
            Err(LayoutError::TooManySeats {
                total_seats: MAX_TOTAL_SEATS + 1,
                max: MAX_TOTAL_SEATS,
            })
        );
        assert!(generate_default_seat_layout("t1", "Galaxy", 1, u32::MAX).is_err());
    }

    #[test]
    fn most_generated_seats_are_available() {
        let mut rng = StdRng::seed_from_u64(42);
        let Ok(big) = generate_default_seat_layout_with(&mut rng, "t1", "Galaxy", 3, 15_000)
        else {
            panic!("layout generation failed");
        };
        let total = big.seat_count();
        let available = big
            .screens
            .iter()
            .flat_map(|screen| screen.seats())
            .filter(|seat| seat.is_available)
            .count();
        let fraction = available as f64 / total as f64;
        assert!(
            (fraction - PREVIEW_AVAILABILITY).abs() < 0.02,
            "available fraction {fraction}"
        );
    }

    #[test]
    fn row_labels() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(27), "AB");
        assert_eq!(row_label(701), "ZZ");
        assert_eq!(row_label(702), "AAA");
    }

    #[test]
    fn find_seat_returns_price() {
        let layout = layout(1, 150);
        let Some(seat) = layout.find_seat("screen-1", "c", 4) else {
            panic!("seat C4 should exist");
        };
        assert_eq!(seat.seat.id, "t1-screen-1-C4");
        assert_eq!(seat.price, 250);
        assert!(layout.find_seat("screen-1", "A", 16).is_none());
        assert!(layout.find_seat("screen-9", "A", 1).is_none());
    }

    #[test]
    fn validate_catches_inconsistency() {
        let mut layout = layout(2, 60);
        assert!(layout.validate().is_ok());
        layout.total_screens = 3;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::Inconsistent(_))
        ));
        layout.total_screens = 2;
        layout.screens[0].categories.clear();
        assert!(layout.validate().is_err());
    }
}
