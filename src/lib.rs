pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self { config }
    }
}

/// Builds the full router with every route mounted.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::routes())
        .merge(routes::charts::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
