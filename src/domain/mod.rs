//! Domain layer: core types, in-memory stores, and pure utilities.
//!
//! Stores ([`EventStore`], [`ApplicationStore`], [`LayoutStore`]) are
//! explicit objects owned by the service layer; nothing here is global.
//! The utility modules ([`phone`], [`pincode`], [`document_text`],
//! [`seat_layout`]) are pure functions with no I/O.

pub mod application;
pub mod application_store;
pub mod document_text;
pub mod event;
pub mod event_store;
pub mod ids;
pub mod layout_store;
pub mod phone;
pub mod pincode;
pub mod seat_layout;
pub mod theater;

pub use application::{ApplicationStatus, NewApplication, TheaterApplication};
pub use application_store::ApplicationStore;
pub use event::{Event, EventPatch, EventStats, EventStatus, NewEvent};
pub use event_store::EventStore;
pub use ids::{ApplicationId, EventId};
pub use layout_store::LayoutStore;
pub use seat_layout::TheaterSeatLayout;
pub use theater::{Theater, TheaterListing};
