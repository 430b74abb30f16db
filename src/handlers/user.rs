// src/handlers/user.rs
use axum::http::StatusCode;
use axum::{extract::State, Json};
use tracing::instrument;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::auth::jwt::{sign_token, DEFAULT_ROLE, TOKEN_LIFETIME_SECONDS};
use crate::dtos::user::{LoginRequest, LoginResponse, RegisterUserRequest, UserResponse};
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::models::user::User;
use crate::state::AppState;
use crate::validation::{map_user_unique_violation, validate_new_user};

// POST /api/users - Signup
#[instrument(skip(state, payload))]
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let violations = validate_new_user(&payload);
    if !violations.is_empty() {
        return Err(AppError::validation(violations));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, roles, password_hash)
         VALUES ($1, $2, $3, $4)
         RETURNING id, username, email, roles, password_hash, created_at, updated_at",
    )
    .bind(payload.username.trim())
    .bind(payload.email.trim())
    .bind(vec![DEFAULT_ROLE.to_string()])
    .bind(password_hash)
    .fetch_one(&state.db_pool)
    .await
    .map_err(map_user_unique_violation)?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            roles: user.roles,
            created_at: user.created_at,
        }),
    ))
}

// POST /api/login - Exchange credentials for a bearer token
#[instrument(skip(state, payload))]
pub async fn login_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, roles, password_hash, created_at, updated_at
         FROM users WHERE username = $1",
    )
    .bind(&payload.username)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
    if !ok {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, &user.username, &user.roles, &secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_LIFETIME_SECONDS,
    }))
}
