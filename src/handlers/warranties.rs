use crate::errors::ServiceError;
use crate::services::warranties::{CreateWarrantyCardRequest, WarrantyService};
use crate::AppState;
use super::Json;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

async fn create_warranty_card(
    State(state): State<AppState>,
    Json(request): Json<CreateWarrantyCardRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let card = WarrantyService::new(state.db.clone())
        .create_warranty_card(request)
        .await?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn list_warranty_cards(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let cards = WarrantyService::new(state.db.clone()).list_warranty_cards().await?;
    Ok(Json(cards))
}

pub fn warranty_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_warranty_card))
        .route("/", get(list_warranty_cards))
}
