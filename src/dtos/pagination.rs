// src/dtos/pagination.rs
use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 3;
pub const MAX_LIMIT: i64 = 100;

/// Query-string pagination parameters, `?page=&limit=`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Resolves defaults and clamps out-of-range values instead of erroring.
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (page, limit)
    }

    pub fn offset(page: i64, limit: i64) -> i64 {
        (page - 1) * limit
    }
}
