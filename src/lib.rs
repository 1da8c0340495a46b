pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::DbPool;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Self {
        Self { db, config }
    }
}

async fn liveness() -> &'static str {
    "Back Office API is running"
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match db::check_connection(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "connected" })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": e.to_string() })),
        ),
    }
}

/// Assembles the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
        .nest("/sales", handlers::sales::sale_routes())
        .nest("/brands", handlers::brands::brand_routes())
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/users", handlers::users::user_routes())
        .nest("/support", handlers::tickets::ticket_routes())
        .nest("/warranty", handlers::warranties::warranty_routes())
        .with_state(state)
}
