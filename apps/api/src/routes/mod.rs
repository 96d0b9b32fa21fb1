pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cv::handlers as cv_handlers;
use crate::generation::handlers as generation_handlers;
use crate::profile::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profile",
            get(profile_handlers::handle_get_profile).put(profile_handlers::handle_put_profile),
        )
        // Generation API
        .route(
            "/api/v1/cv/generate",
            post(generation_handlers::handle_generate),
        )
        .route("/api/v1/cv/score", post(generation_handlers::handle_score))
        // CV records API
        .route("/api/v1/cv", get(cv_handlers::handle_list_cvs))
        .route(
            "/api/v1/cv/:id",
            get(cv_handlers::handle_get_cv).delete(cv_handlers::handle_delete_cv),
        )
        .route("/api/v1/cv/:id/export", post(cv_handlers::handle_export_cv))
        .with_state(state)
}
