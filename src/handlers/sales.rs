use crate::errors::ServiceError;
use crate::services::sales::{CreateSaleRequest, SaleService};
use crate::AppState;
use super::Json;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;

async fn create_sale(
    State(state): State<AppState>,
    Json(request): Json<CreateSaleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = SaleService::new(state.db.clone()).create_sale(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Sale created successfully",
            "sale": sale,
        })),
    ))
}

async fn list_sales(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let sales = SaleService::new(state.db.clone()).list_sales().await?;
    Ok(Json(sales))
}

async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = SaleService::new(state.db.clone()).get_sale(id).await?;
    Ok(Json(sale))
}

pub fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_sale))
        .route("/", get(list_sales))
        .route("/:id", get(get_sale))
}
