//! API routes module

pub mod natural;
pub mod schedule;
pub mod tasks;

use std::sync::{Arc, RwLock};

use axum::{Router, routing::get};

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn home() -> &'static str {
    "Fluid calendar service is running"
}

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(home))
        // Task CRUD routes
        .merge(tasks::router())
        // Scheduling routes
        .merge(schedule::router())
        // Natural-language intake routes
        .merge(natural::router())
}
