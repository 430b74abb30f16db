pub mod customers;
pub mod products;
pub mod users;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(customers::routes())
        .merge(products::routes())
        .merge(users::routes())
}

/// The full application: /api base path, health route, and an envelope
/// fallback so even an unmatched route answers with {code, message}.
pub fn create_app(state: AppState) -> Router {
    let api = create_router().route("/health", get(health_check));

    Router::new()
        .route("/", get(|| async { "BileMo API" }))
        .nest("/api", api)
        .fallback(unknown_route)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn unknown_route() -> AppError {
    AppError::not_found()
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    // A lazy pool never connects; these tests only exercise paths that are
    // rejected before any query runs.
    fn test_app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/bilemo_test")
            .unwrap();
        create_app(AppState::new(pool))
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_routes_answer_with_the_error_envelope() {
        let res = test_app()
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json["code"], 404);
        assert_eq!(json["message"], "Resource not found");
    }

    #[tokio::test]
    async fn malformed_json_answers_with_a_violation_envelope() {
        std::env::set_var("JWT_SECRET", "test-secret");
        let token = crate::auth::jwt::sign_token(1, "tester", &[], "test-secret").unwrap();

        let res = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/customers")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json[0]["code"], "invalid_payload");
        assert!(json[0]["message"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn missing_token_answers_with_the_envelope() {
        let res = test_app()
            .oneshot(Request::builder().uri("/api/customers").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(res).await;
        assert_eq!(json["code"], 401);
    }
}
