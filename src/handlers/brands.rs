use crate::errors::ServiceError;
use crate::services::brands::{BrandService, CreateBrandRequest};
use crate::AppState;
use super::Json;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

async fn create_brand(
    State(state): State<AppState>,
    Json(request): Json<CreateBrandRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let brand = BrandService::new(state.db.clone()).create_brand(request).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

async fn list_brands(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let brands = BrandService::new(state.db.clone()).list_brands().await?;
    Ok(Json(brands))
}

pub fn brand_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_brand))
        .route("/", get(list_brands))
}
