// src/fixtures.rs
//
// Demo dataset loader, run with `--seed`: one known account, a few random
// users, fifty customers spread across them, and a small catalog. Not
// idempotent; re-running against a seeded database will trip the unique
// constraints.

use bcrypt::{hash, DEFAULT_COST};
use rand::prelude::*;
use sqlx::PgPool;

use crate::auth::jwt::DEFAULT_ROLE;
use crate::error::AppError;

const FIRST_NAMES: &[&str] = &[
    "Camille", "Jean", "Marie", "Luc", "Sophie", "Pierre", "Claire", "Hugo", "Emma", "Louis",
];
const LAST_NAMES: &[&str] = &[
    "Martin", "Bernard", "Dubois", "Moreau", "Laurent", "Simon", "Michel", "Leroy", "Roux", "Petit",
];
const PHONE_MODELS: &[&str] = &[
    "BileMo One", "BileMo Pro", "BileMo Lite", "BileMo Max", "BileMo Mini",
    "BileMo Edge", "BileMo Fold", "BileMo Nova", "BileMo Pulse", "BileMo Prime",
];

pub async fn seed(pool: &PgPool) -> Result<(), AppError> {
    let mut rng = rand::rng();

    let mut user_ids: Vec<i64> = Vec::new();

    // Known demo account
    user_ids.push(insert_user(pool, "BileMo", "user@bilemo.com", "BileMoP07").await?);

    for i in 0..3 {
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Jean");
        let username = format!("{}{i}", first.to_lowercase());
        let email = format!("{username}@example.com");
        let password = format!("demo-{i}-{}", rng.random_range(1000..9999));
        user_ids.push(insert_user(pool, &username, &email, &password).await?);
    }

    for i in 0..50 {
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Jean");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Martin");
        let email = format!("{}.{}{i}@example.com", first.to_lowercase(), last.to_lowercase());
        let owner = user_ids.choose(&mut rng).copied().unwrap_or(user_ids[0]);

        sqlx::query(
            "INSERT INTO customers (first_name, last_name, email, user_id)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(first)
        .bind(last)
        .bind(&email)
        .bind(owner)
        .execute(pool)
        .await?;
    }

    for model in PHONE_MODELS {
        let price = (rng.random_range(10.0..100.0_f64) * 100.0).round() / 100.0;
        sqlx::query(
            "INSERT INTO products (name, description, price)
             VALUES ($1, $2, $3)",
        )
        .bind(model)
        .bind(format!("{model}, the phone that fits your budget"))
        .bind(price)
        .execute(pool)
        .await?;
    }

    tracing::info!(
        users = user_ids.len(),
        customers = 50,
        products = PHONE_MODELS.len(),
        "Seeded demo dataset"
    );

    Ok(())
}

async fn insert_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<i64, AppError> {
    let password_hash =
        hash(password, DEFAULT_COST).map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, roles, password_hash)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(vec![DEFAULT_ROLE.to_string()])
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
