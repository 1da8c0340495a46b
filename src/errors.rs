use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};

/// Wire shape for every error the API emits.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error")]
    DatabaseError(#[from] DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    /// A store uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// A foreign key failed to resolve to an existing row.
    #[error("{0}")]
    InvalidReference(String),

    #[error("{0}")]
    InternalError(String),
}

impl ServiceError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::InvalidReference(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// Classifies a write failure against the constraints of the sale
    /// aggregate: duplicate bill number vs dangling customer/product
    /// reference vs anything else.
    pub fn from_sale_write_err(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::Conflict("Bill number already exists".to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::InvalidReference("Invalid customer or product ID".to_string())
            }
            _ => Self::DatabaseError(err),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures keep their diagnostic detail in a separate
        // field; user-facing errors are the message alone.
        let body = match &self {
            ServiceError::DatabaseError(e) => ErrorResponse {
                error: "Database error".to_string(),
                details: Some(e.to_string()),
            },
            ServiceError::InternalError(detail) => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(detail.clone()),
            },
            other => ErrorResponse {
                error: other.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidReference("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::InternalError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn user_facing_errors_expose_their_message() {
        let response = ServiceError::NotFound("Sale not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error, "Sale not found");
        assert!(payload.details.is_none());
    }

    #[tokio::test]
    async fn database_errors_carry_details() {
        let response =
            ServiceError::DatabaseError(DbErr::Custom("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error, "Database error");
        assert!(payload.details.unwrap().contains("boom"));
    }
}
