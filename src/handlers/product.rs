// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::instrument;

use crate::cache::ApiCache;
use crate::dtos::pagination::PageQuery;
use crate::dtos::product::ProductResponse;
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;

// GET /api/products?page=&limit= - Public paginated catalog
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, AppError> {
    let (page, limit) = query.normalize();
    let key = ApiCache::product_list_key(page, limit);

    if let Some(hit) = state.cache.get_products(&key).await {
        return Ok(Json(hit));
    }

    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price::FLOAT8 AS price, created_at, updated_at
         FROM products
         ORDER BY id
         LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(PageQuery::offset(page, limit))
    .fetch_all(&state.db_pool)
    .await?;

    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    let value = serde_json::to_value(body)
        .map_err(|e| AppError::internal(format!("Serialization failed: {e}")))?;
    state.cache.put_products(key, value.clone()).await;

    Ok(Json(value))
}

// GET /api/products/:id - Public detail, 404 if absent
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let key = ApiCache::product_detail_key(id);

    if let Some(hit) = state.cache.get_products(&key).await {
        return Ok(Json(hit));
    }

    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price::FLOAT8 AS price, created_at, updated_at
         FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(AppError::not_found)?;

    let value = serde_json::to_value(ProductResponse::from(product))
        .map_err(|e| AppError::internal(format!("Serialization failed: {e}")))?;
    state.cache.put_products(key, value.clone()).await;

    Ok(Json(value))
}
