use axum::{routing::post, Router};

use crate::handlers::user::{login_user, register_user};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/login", post(login_user))
}
