//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
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
        // Regeneration workflow
        .route("/timetable/generate", post(handlers::generate_timetable))
        .route("/timetable/clear", post(handlers::clear_timetable))
        // Read side
        .route("/timetable", get(handlers::list_timetable))
        .route("/timetable/by-course", get(handlers::list_by_course))
        .route("/timetable/grid/{course_id}", get(handlers::get_course_grid));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::services::{GenerationConfig, RegenerationController};
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let controller = Arc::new(RegenerationController::new(
            repo.clone(),
            GenerationConfig::default(),
        ));
        let state = AppState::new(repo, controller);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
