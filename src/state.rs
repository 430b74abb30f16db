use sqlx::PgPool;

use crate::cache::ApiCache;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub cache: ApiCache,
}

impl AppState {
    pub fn new(db_pool: PgPool) -> Self {
        Self {
            db_pool,
            cache: ApiCache::new(),
        }
    }
}
