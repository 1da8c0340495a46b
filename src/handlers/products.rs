use crate::errors::ServiceError;
use crate::services::products::{CreateProductRequest, ProductService};
use crate::AppState;
use super::Json;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = ProductService::new(state.db.clone())
        .create_product(request)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let products = ProductService::new(state.db.clone()).list_products().await?;
    Ok(Json(products))
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_product))
        .route("/", get(list_products))
}
