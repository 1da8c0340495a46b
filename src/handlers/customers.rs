use crate::errors::ServiceError;
use crate::services::customers::{CreateCustomerRequest, CustomerService};
use crate::AppState;
use super::Json;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = CustomerService::new(state.db.clone())
        .create_customer(request)
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let customers = CustomerService::new(state.db.clone()).list_customers().await?;
    Ok(Json(customers))
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_customer))
        .route("/", get(list_customers))
}
