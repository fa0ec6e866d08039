//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Station registry
        .route("/stations", get(handlers::list_stations))
        .route("/stations/{station_id}", get(handlers::get_station))
        // Insight engine
        .route("/stations/{station_id}/insight", get(handlers::get_insight))
        .route("/stations/{station_id}/series", get(handlers::get_series))
        .route("/stations/{station_id}/records", get(handlers::get_records))
        .route("/stations/{station_id}/rankings/seasonal", get(handlers::get_seasonal_ranking))
        .route("/stations/{station_id}/rankings/extremes", get(handlers::get_extremes_ranking))
        .route("/stations/{station_id}/latest-date", get(handlers::get_latest_date))
        // Latest-insight cache
        .route("/latest-insights", get(handlers::get_latest_insights))
        .route("/recompute-latest", post(handlers::trigger_recompute_latest))
        // Observation ingest
        .route("/observations", post(handlers::ingest_observations))
        // Job management
        .route("/jobs/{job_id}", get(handlers::get_job_status))
        .route("/jobs/{job_id}/logs", get(handlers::stream_job_logs));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Allow large observation batches during backfills.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
