pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::services::{ai_service::ExamGenerator, exam_service::ExamService};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub exam_service: ExamService,
}

impl AppState {
    pub fn new(generator: Arc<dyn ExamGenerator>, config: &Config) -> Self {
        let exam_service = ExamService::new(generator, config.max_questions);

        Self { exam_service }
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/v1/exams/generate", post(routes::exams::generate_exam))
        .route("/v1/exams/download", post(routes::exams::download_exam))
        .with_state(state)
        .layer(middleware::cors::frontend_cors(&config.allowed_origins))
        .layer(middleware::panic::catch_panic())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}
