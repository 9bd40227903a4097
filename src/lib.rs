//! # bookmyblock-gateway
//!
//! REST gateway for the BookMyBlock ticket-booking platform.
//!
//! This crate serves the three BookMyBlock dashboards (User, Owner, Admin):
//! screening events, theater registration and review, an aggregated theater
//! catalogue with pincode proximity search, and generated seat layouts with
//! tiered pricing. All state lives in explicit in-memory stores owned by the
//! application state; nothing survives a restart.
//!
//! ## Architecture
//!
//! ```text
//! Dashboards (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── AuthService + TokenVerifier (auth/)
//!     │
//!     ├── Event / Application / Layout services (service/)
//!     ├── TheaterService ── OwnerDirectory (HTTP or local)
//!     │
//!     ├── EventStore, ApplicationStore, LayoutStore (domain/)
//!     └── phone, pincode, document_text, seat_layout (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
