// src/dtos/links.rs
use serde::Serialize;

/// HATEOAS link element as it appears under "_links".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerLinks {
    pub detail: Link,
    pub update: Link,
    pub delete: Link,
}

impl CustomerLinks {
    pub fn for_id(id: i64) -> Self {
        let href = format!("/api/customers/{id}");
        Self {
            detail: Link::new(href.clone()),
            update: Link::new(href.clone()),
            delete: Link::new(href),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductLinks {
    pub detail: Link,
}

impl ProductLinks {
    pub fn for_id(id: i64) -> Self {
        Self {
            detail: Link::new(format!("/api/products/{id}")),
        }
    }
}
