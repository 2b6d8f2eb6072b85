// Library interface for backend - exposes modules for testing

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod repository;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
        // Accounts
        .route("/api/account", get(handlers::accounts::get_account))
        .route("/api/account", post(handlers::accounts::register_account))
        // Wagers
        .route("/api/wager", post(handlers::wagers::place_wager))
        // Daily bonus
        .route("/api/bonus", get(handlers::bonus::check_bonus))
        .route("/api/bonus/claim", post(handlers::bonus::claim_bonus))
        // Read-side aggregation
        .route("/api/leaderboard", get(handlers::leaderboard::get_leaderboard))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        // Metrics
        .route("/metrics", get(handlers::metrics::metrics_handler))
        // State
        .with_state(state)
        // Middleware
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
