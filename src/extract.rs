// src/extract.rs
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::AppError;
use crate::validation::INVALID_PAYLOAD;

/// JSON body extractor whose rejection is the API's own error envelope: a
/// body axum cannot parse becomes a 400 violation list instead of the
/// framework's plain-text response.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(AppError::violation(INVALID_PAYLOAD, rejection.body_text())),
        }
    }
}
