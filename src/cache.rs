// src/cache.rs
//
// Read-through cache for list/detail endpoints. Entries are grouped by
// resource type (one moka cache per tag: customers, products) and a write to
// a resource type drops its whole tag rather than individual keys. A TTL
// bounds staleness as a backstop.

use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

const MAX_ENTRIES: u64 = 1024;
const TTL_SECONDS: u64 = 300;

/// Cached responses are stored as already-serialized JSON so hits skip the
/// database and the DTO mapping entirely.
#[derive(Clone)]
pub struct ApiCache {
    customers: Cache<String, Value>,
    products: Cache<String, Value>,
}

impl ApiCache {
    pub fn new() -> Self {
        Self {
            customers: build_cache(),
            products: build_cache(),
        }
    }

    // Customer listings are caller-scoped, so the key carries the owner's id.
    // A key of only page+limit would hand one user's cached page to another.
    pub fn customer_list_key(user_id: i64, page: i64, limit: i64) -> String {
        format!("customers-{user_id}-{page}-{limit}")
    }

    pub fn customer_detail_key(user_id: i64, id: i64) -> String {
        format!("customerDetail-{user_id}-{id}")
    }

    pub fn product_list_key(page: i64, limit: i64) -> String {
        format!("products-{page}-{limit}")
    }

    pub fn product_detail_key(id: i64) -> String {
        format!("productDetail-{id}")
    }

    pub async fn get_customers(&self, key: &str) -> Option<Value> {
        self.customers.get(key).await
    }

    pub async fn put_customers(&self, key: String, value: Value) {
        self.customers.insert(key, value).await;
    }

    /// Drops every cached customer entry. Called on any customer write.
    pub fn invalidate_customers(&self) {
        self.customers.invalidate_all();
    }

    pub async fn get_products(&self, key: &str) -> Option<Value> {
        self.products.get(key).await
    }

    pub async fn put_products(&self, key: String, value: Value) {
        self.products.insert(key, value).await;
    }

    /// Drops every cached product entry. The API exposes no catalog write
    /// path today, so until one exists the TTL is what bounds staleness
    /// against out-of-band catalog changes.
    pub fn invalidate_products(&self) {
        self.products.invalidate_all();
    }
}

impl Default for ApiCache {
    fn default() -> Self {
        Self::new()
    }
}

fn build_cache() -> Cache<String, Value> {
    Cache::builder()
        .max_capacity(MAX_ENTRIES)
        .time_to_live(Duration::from_secs(TTL_SECONDS))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_keys_are_scoped_to_the_owner() {
        let a = ApiCache::customer_list_key(1, 1, 3);
        let b = ApiCache::customer_list_key(2, 1, 3);
        assert_ne!(a, b);
        assert_eq!(a, "customers-1-1-3");

        let a = ApiCache::customer_detail_key(1, 9);
        let b = ApiCache::customer_detail_key(2, 9);
        assert_ne!(a, b);
        assert_eq!(a, "customerDetail-1-9");
    }

    #[tokio::test]
    async fn read_through_hit_after_put() {
        let cache = ApiCache::new();
        let key = ApiCache::product_list_key(1, 3);
        assert!(cache.get_products(&key).await.is_none());

        cache.put_products(key.clone(), json!([{"id": 1}])).await;
        assert_eq!(cache.get_products(&key).await, Some(json!([{"id": 1}])));
    }

    #[tokio::test]
    async fn write_drops_the_whole_tag() {
        let cache = ApiCache::new();
        for page in 1..=3 {
            cache
                .put_customers(ApiCache::customer_list_key(1, page, 3), json!([]))
                .await;
        }
        cache
            .put_customers(ApiCache::customer_detail_key(1, 7), json!({"id": 7}))
            .await;
        cache.invalidate_customers();
        for page in 1..=3 {
            let key = ApiCache::customer_list_key(1, page, 3);
            assert!(cache.get_customers(&key).await.is_none());
        }
        let key = ApiCache::customer_detail_key(1, 7);
        assert!(cache.get_customers(&key).await.is_none());

        cache
            .put_products(ApiCache::product_list_key(1, 3), json!([]))
            .await;
        cache.invalidate_products();
        let key = ApiCache::product_list_key(1, 3);
        assert!(cache.get_products(&key).await.is_none());
    }

    #[tokio::test]
    async fn tags_are_independent() {
        let cache = ApiCache::new();
        cache
            .put_products(ApiCache::product_detail_key(9), json!({"id": 9}))
            .await;
        cache.invalidate_customers();
        let key = ApiCache::product_detail_key(9);
        assert!(cache.get_products(&key).await.is_some());
    }
}
