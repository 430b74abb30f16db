// src/dtos/product.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dtos::links::ProductLinks;
use crate::models::product::Product;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    pub links: ProductLinks,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            links: ProductLinks::for_id(product.id),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_exposes_a_detail_link() {
        let product = Product {
            id: 3,
            name: "BileMo One".to_string(),
            description: None,
            price: 59.9,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(json["_links"]["detail"]["href"], "/api/products/3");
        assert_eq!(json["description"], serde_json::Value::Null);
    }
}
