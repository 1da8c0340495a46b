use crate::errors::ServiceError;
use crate::services::users::{CreateUserRequest, UpdateUserRequest, UserService};
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

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = UserService::new(state.db.clone()).create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let users = UserService::new(state.db.clone()).list_users().await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = UserService::new(state.db.clone()).get_user(id).await?;
    Ok(Json(user))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let user = UserService::new(state.db.clone()).update_user(id, request).await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    UserService::new(state.db.clone()).delete_user(id).await?;
    Ok(Json(json!({ "message": "User deleted" })))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
}
