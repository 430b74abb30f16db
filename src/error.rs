// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use serde_json::json;

/// A single validation failure with a stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub code: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

#[derive(Debug)]
pub enum AppError {
    Database(sqlx::Error),
    Unauthorized(String),
    NotFound,
    Validation(Vec<Violation>),
    Internal(String),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn not_found() -> Self {
        AppError::NotFound
    }

    pub fn validation(violations: Vec<Violation>) -> Self {
        AppError::Validation(violations)
    }

    pub fn violation(code: &'static str, msg: impl Into<String>) -> Self {
        AppError::Validation(vec![Violation::new(code, msg)])
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn db(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// Every fault maps to exactly one status + JSON envelope. Validation failures
// serialize as an array of {code, message}; everything else as a single object
// carrying the HTTP status as its code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::Validation(violations) => {
                return (status, Json(violations)).into_response();
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "Database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                msg
            }
            AppError::Unauthorized(msg) => msg,
            AppError::NotFound => "Resource not found".to_string(),
        };

        let body = Json(json!({
            "code": status.as_u16(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            other => AppError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn errors_map_to_expected_statuses() {
        assert_eq!(status_of(AppError::not_found()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::unauthorized("no token")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::violation("invalid_email", "bad email")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::internal("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::db(sqlx::Error::PoolClosed)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_becomes_404() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn violations_serialize_with_stable_codes() {
        let v = Violation::new("duplicate_email", "Email already in use");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["code"], "duplicate_email");
        assert_eq!(json["message"], "Email already in use");
    }
}
