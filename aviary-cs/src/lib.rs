//! aviary-cs library - Catalog Service module
//!
//! HTTP service for the Aviary bird species catalog: record creation with
//! media assets, listing, random selection, and named group management.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // Liveness: 200 with empty body
        .route("/", get(|| async {}))
        .route("/create", post(api::create_bird))
        .route("/bird-data-upload", post(api::bird_data_upload))
        .route("/get-all", get(api::get_all))
        .route("/get-random", get(api::get_random))
        .route("/create-group", post(api::create_group))
        .route("/add-to-group", post(api::add_to_group))
        .route("/get-group", get(api::get_group))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
