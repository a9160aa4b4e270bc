//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
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
        // Appointments
        .route("/appointments", post(handlers::create_appointment))
        .route("/appointments/stats", get(handlers::get_daily_stats))
        .route("/appointments/{id}", get(handlers::get_appointment))
        .route("/appointments/{id}/cancel", post(handlers::cancel_appointment))
        .route("/appointments/{id}/status", post(handlers::set_appointment_status))
        // Providers
        .route("/providers/{id}/slots", get(handlers::list_provider_slots))
        .route("/providers/{id}/appointments", get(handlers::provider_day_view))
        .route("/providers/{id}/availability", get(handlers::get_week_schedule))
        .route("/providers/{id}/availability/{weekday}", put(handlers::set_availability_window))
        // Patients
        .route("/patients/{id}/appointments", get(handlers::patient_appointments));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
