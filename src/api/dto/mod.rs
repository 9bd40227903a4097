//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire. Domain records that are returned
//! as-is (events, applications, layouts) serialize themselves.

pub mod application_dto;
pub mod common_dto;
pub mod event_dto;
pub mod layout_dto;
pub mod utility_dto;

pub use application_dto::*;
pub use common_dto::*;
pub use event_dto::*;
pub use layout_dto::*;
pub use utility_dto::*;
