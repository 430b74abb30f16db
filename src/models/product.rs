use chrono::{DateTime, Utc};
use sqlx::FromRow;

// price is NUMERIC in the store; queries cast it to FLOAT8.
#[derive(Debug, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
