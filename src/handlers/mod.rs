pub mod brands;
pub mod customers;
pub mod products;
pub mod sales;
pub mod tickets;
pub mod users;
pub mod warranties;

use crate::errors::ServiceError;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON extractor that routes body deserialization failures through
/// [`ServiceError`], so a malformed or incomplete request body gets the
/// standard 400 `{error}` shape instead of axum's plain-text rejection.
pub struct Json<T>(pub T);

#[async_trait::async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServiceError::ValidationError(rejection.body_text())),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
