//! REST endpoint handlers organized by resource.

pub mod applications;
pub mod auth;
pub mod events;
pub mod layouts;
pub mod system;
pub mod theaters;
pub mod utilities;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(theaters::routes())
        .merge(applications::routes())
        .merge(layouts::routes())
        .merge(utilities::routes())
        .merge(auth::routes())
}
