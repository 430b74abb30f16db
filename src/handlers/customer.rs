// src/handlers/customer.rs
use axum::http::StatusCode;
use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::instrument;

use crate::cache::ApiCache;
use crate::dtos::customer::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::dtos::pagination::PageQuery;
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthContext;
use crate::models::customer::Customer;
use crate::state::AppState;
use crate::validation::{
    map_customer_unique_violation, validate_customer_update, validate_new_customer,
};

// POST /api/customers - Create a customer owned by the caller
#[instrument(skip(state, payload, auth))]
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(payload): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let violations = validate_new_customer(&payload);
    if !violations.is_empty() {
        return Err(AppError::validation(violations));
    }

    let customer = sqlx::query_as::<_, Customer>(
        "INSERT INTO customers (first_name, last_name, email, user_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, first_name, last_name, email, user_id, created_at, updated_at",
    )
    .bind(payload.first_name.trim())
    .bind(payload.last_name.trim())
    .bind(payload.email.trim())
    .bind(auth.user_id)
    .fetch_one(&state.db_pool)
    .await
    .map_err(map_customer_unique_violation)?;

    state.cache.invalidate_customers();

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

// GET /api/customers?page=&limit= - The caller's customers, in creation order
#[instrument(skip(state, auth))]
pub async fn get_customers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, AppError> {
    let (page, limit) = query.normalize();
    let key = ApiCache::customer_list_key(auth.user_id, page, limit);

    if let Some(hit) = state.cache.get_customers(&key).await {
        return Ok(Json(hit));
    }

    let customers = sqlx::query_as::<_, Customer>(
        "SELECT id, first_name, last_name, email, user_id, created_at, updated_at
         FROM customers WHERE user_id = $1
         ORDER BY id
         LIMIT $2 OFFSET $3",
    )
    .bind(auth.user_id)
    .bind(limit)
    .bind(PageQuery::offset(page, limit))
    .fetch_all(&state.db_pool)
    .await?;

    let body: Vec<CustomerResponse> = customers.into_iter().map(CustomerResponse::from).collect();
    let value = serde_json::to_value(body)
        .map_err(|e| AppError::internal(format!("Serialization failed: {e}")))?;
    state.cache.put_customers(key, value.clone()).await;

    Ok(Json(value))
}

// GET /api/customers/:id - 404 for unknown ids, 401 for foreign owners.
// The detail key carries the caller's id, so a cached entry is only ever
// reachable by the owner that populated it; misses re-check ownership before
// anything is stored.
#[instrument(skip(state, auth))]
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let key = ApiCache::customer_detail_key(auth.user_id, id);

    if let Some(hit) = state.cache.get_customers(&key).await {
        return Ok(Json(hit));
    }

    let customer = fetch_owned_customer(&state, id, &auth).await?;

    let value = serde_json::to_value(CustomerResponse::from(customer))
        .map_err(|e| AppError::internal(format!("Serialization failed: {e}")))?;
    state.cache.put_customers(key, value.clone()).await;

    Ok(Json(value))
}

// PUT /api/customers/:id - Partial update, absent fields are left untouched
#[instrument(skip(state, payload, auth))]
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    fetch_owned_customer(&state, id, &auth).await?;

    let violations = validate_customer_update(&payload);
    if !violations.is_empty() {
        return Err(AppError::validation(violations));
    }

    let customer = sqlx::query_as::<_, Customer>(
        "UPDATE customers SET
         first_name = COALESCE($1, first_name),
         last_name = COALESCE($2, last_name),
         email = COALESCE($3, email),
         updated_at = now()
         WHERE id = $4
         RETURNING id, first_name, last_name, email, user_id, created_at, updated_at",
    )
    .bind(payload.first_name.map(|s| s.trim().to_string()))
    .bind(payload.last_name.map(|s| s.trim().to_string()))
    .bind(payload.email.map(|s| s.trim().to_string()))
    .bind(id)
    .fetch_one(&state.db_pool)
    .await
    .map_err(map_customer_unique_violation)?;

    state.cache.invalidate_customers();

    Ok(Json(CustomerResponse::from(customer)))
}

// DELETE /api/customers/:id - 204 with empty body
#[instrument(skip(state, auth))]
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    fetch_owned_customer(&state, id, &auth).await?;

    sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    state.cache.invalidate_customers();

    Ok(StatusCode::NO_CONTENT)
}

// 404 before the ownership check: an unknown id is "not found" for everyone,
// a known id owned by someone else is 401 for the caller.
async fn fetch_owned_customer(
    state: &AppState,
    id: i64,
    auth: &AuthContext,
) -> Result<Customer, AppError> {
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, first_name, last_name, email, user_id, created_at, updated_at
         FROM customers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(AppError::not_found)?;

    if customer.user_id != auth.user_id {
        tracing::warn!(
            customer_id = id,
            owner_id = customer.user_id,
            caller_id = auth.user_id,
            "Blocked access to a foreign customer"
        );
        return Err(AppError::unauthorized("You do not own this customer"));
    }

    Ok(customer)
}
