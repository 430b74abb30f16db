// src/dtos/customer.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dtos::links::CustomerLinks;
use crate::models::customer::Customer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    pub links: CustomerLinks,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            links: CustomerLinks::for_id(customer.id),
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            user_id: customer.user_id,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_carries_user_id_and_links() {
        let customer = Customer {
            id: 7,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@x.com".to_string(),
            user_id: 42,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(CustomerResponse::from(customer)).unwrap();
        assert_eq!(json["userId"], 42);
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["_links"]["detail"]["href"], "/api/customers/7");
        assert_eq!(json["_links"]["delete"]["href"], "/api/customers/7");
    }

    #[test]
    fn absent_update_fields_deserialize_to_none() {
        let req: UpdateCustomerRequest = serde_json::from_str(r#"{"email":"new@x.com"}"#).unwrap();
        assert!(req.first_name.is_none());
        assert!(req.last_name.is_none());
        assert_eq!(req.email.as_deref(), Some("new@x.com"));
    }
}
