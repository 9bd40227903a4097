//! Service layer: business logic orchestration.
//!
//! [`EventService`], [`ApplicationService`] and [`LayoutService`] validate
//! requests and drive the domain stores. [`TheaterService`] assembles the
//! user-facing catalogue from an [`OwnerDirectory`].

pub mod application_service;
pub mod event_service;
pub mod layout_service;
pub mod owner_directory;
pub mod theater_service;

pub use application_service::ApplicationService;
pub use event_service::EventService;
pub use layout_service::LayoutService;
pub use owner_directory::{HttpOwnerDirectory, LocalOwnerDirectory, OwnerDirectory};
pub use theater_service::{TheaterQuery, TheaterService};
