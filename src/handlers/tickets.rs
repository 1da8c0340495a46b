use crate::errors::ServiceError;
use crate::services::tickets::{CreateTicketRequest, TicketService, UpdateTicketRequest};
use crate::AppState;
use super::Json;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;

async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let ticket = TicketService::new(state.db.clone()).create_ticket(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Ticket created", "data": ticket })),
    ))
}

async fn list_tickets(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let tickets = TicketService::new(state.db.clone()).list_tickets().await?;
    Ok(Json(tickets))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let ticket = TicketService::new(state.db.clone()).get_ticket(id).await?;
    Ok(Json(ticket))
}

async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTicketRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let ticket = TicketService::new(state.db.clone())
        .update_ticket(id, request)
        .await?;
    Ok(Json(json!({ "message": "Ticket updated", "data": ticket })))
}

async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let ticket = TicketService::new(state.db.clone()).delete_ticket(id).await?;
    Ok(Json(json!({ "message": "Ticket deleted", "data": ticket })))
}

pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_ticket))
        .route("/", get(list_tickets))
        .route("/:id", get(get_ticket))
        .route("/:id", put(update_ticket))
        .route("/:id", delete(delete_ticket))
}
