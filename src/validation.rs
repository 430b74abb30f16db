// src/validation.rs
//
// Field-level constraint checks for customer payloads. Each failure carries a
// stable code; unmapped store-level violations fall back to a generic one.

use crate::dtos::customer::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::dtos::user::RegisterUserRequest;
use crate::error::{AppError, Violation};

pub const DUPLICATE_EMAIL: &str = "duplicate_email";
pub const DUPLICATE_USERNAME: &str = "duplicate_username";
pub const INVALID_EMAIL: &str = "invalid_email";
pub const MISSING_EMAIL: &str = "missing_email";
pub const MISSING_FIRST_NAME: &str = "missing_first_name";
pub const MISSING_LAST_NAME: &str = "missing_last_name";
pub const MISSING_USERNAME: &str = "missing_username";
pub const WEAK_PASSWORD: &str = "weak_password";
pub const INVALID_PAYLOAD: &str = "invalid_payload";

pub fn validate_new_customer(req: &CreateCustomerRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if req.first_name.trim().is_empty() {
        violations.push(Violation::new(MISSING_FIRST_NAME, "First name is required"));
    }
    if req.last_name.trim().is_empty() {
        violations.push(Violation::new(MISSING_LAST_NAME, "Last name is required"));
    }
    if req.email.trim().is_empty() {
        violations.push(Violation::new(MISSING_EMAIL, "Email is required"));
    } else if !is_valid_email(&req.email) {
        violations.push(Violation::new(
            INVALID_EMAIL,
            format!("The email {} is not a valid email", req.email),
        ));
    }

    violations
}

/// Update payloads are partial: absent fields are left alone, present fields
/// must still satisfy the create-time constraints.
pub fn validate_customer_update(req: &UpdateCustomerRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(first_name) = &req.first_name {
        if first_name.trim().is_empty() {
            violations.push(Violation::new(MISSING_FIRST_NAME, "First name is required"));
        }
    }
    if let Some(last_name) = &req.last_name {
        if last_name.trim().is_empty() {
            violations.push(Violation::new(MISSING_LAST_NAME, "Last name is required"));
        }
    }
    if let Some(email) = &req.email {
        if !is_valid_email(email) {
            violations.push(Violation::new(
                INVALID_EMAIL,
                format!("The email {email} is not a valid email"),
            ));
        }
    }

    violations
}

pub fn validate_new_user(req: &RegisterUserRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if req.username.trim().is_empty() {
        violations.push(Violation::new(MISSING_USERNAME, "Username is required"));
    }
    if !is_valid_email(&req.email) {
        violations.push(Violation::new(
            INVALID_EMAIL,
            format!("The email {} is not a valid email", req.email),
        ));
    }
    if req.password.len() < 6 {
        violations.push(Violation::new(
            WEAK_PASSWORD,
            "Password must be at least 6 characters",
        ));
    }

    violations
}

/// Duplicate-email races are not locked against; the store's unique
/// constraint is the authority and its violation surfaces as a 400.
pub fn map_customer_unique_violation(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some("23505") {
            return AppError::violation(DUPLICATE_EMAIL, "A customer with this email already exists");
        }
    }
    AppError::db(err)
}

/// The users table has two unique constraints; the constraint name picks the
/// violation code, with a generic fallback for anything unrecognized.
pub fn map_user_unique_violation(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some("23505") {
            return match db_err.constraint() {
                Some("users_username_key") => {
                    AppError::violation(DUPLICATE_USERNAME, "This username is already taken")
                }
                Some("users_email_key") => {
                    AppError::violation(DUPLICATE_EMAIL, "This email is already registered")
                }
                _ => AppError::violation(INVALID_PAYLOAD, "Invalid payload"),
            };
        }
    }
    AppError::db(err)
}

// Deliberately permissive: one '@', non-empty local part, domain with a dot
// not at either edge. The store never sees an address the mail layer would
// have to fully parse anyway.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.len() > 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::customer::{CreateCustomerRequest, UpdateCustomerRequest};

    fn create_req(first: &str, last: &str, email: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn accepts_a_complete_payload() {
        let req = create_req("John", "Doe", "john@x.com");
        assert!(validate_new_customer(&req).is_empty());
    }

    #[test]
    fn flags_every_missing_field_at_once() {
        let req = create_req("", " ", "");
        let violations = validate_new_customer(&req);
        let codes: Vec<&str> = violations.iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![MISSING_FIRST_NAME, MISSING_LAST_NAME, MISSING_EMAIL]);
    }

    #[test]
    fn flags_a_malformed_email() {
        for bad in ["not-an-email", "@x.com", "a@b", "a b@x.com", "a@.com"] {
            let req = create_req("John", "Doe", bad);
            let violations = validate_new_customer(&req);
            assert_eq!(violations.len(), 1, "expected rejection of {bad}");
            assert_eq!(violations[0].code, INVALID_EMAIL);
        }
    }

    #[test]
    fn update_ignores_absent_fields() {
        let req = UpdateCustomerRequest {
            first_name: None,
            last_name: None,
            email: None,
        };
        assert!(validate_customer_update(&req).is_empty());
    }

    #[test]
    fn update_checks_present_fields() {
        let req = UpdateCustomerRequest {
            first_name: Some("".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("broken".to_string()),
        };
        let codes: Vec<&str> = validate_customer_update(&req).iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![MISSING_FIRST_NAME, INVALID_EMAIL]);
    }

    #[test]
    fn signup_taxonomy_covers_username_email_and_password() {
        let req = RegisterUserRequest {
            username: "  ".to_string(),
            email: "nope".to_string(),
            password: "123".to_string(),
        };
        let codes: Vec<&str> = validate_new_user(&req).iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![MISSING_USERNAME, INVALID_EMAIL, WEAK_PASSWORD]);

        let req = RegisterUserRequest {
            username: "bilemo".to_string(),
            email: "user@bilemo.com".to_string(),
            password: "BileMoP07".to_string(),
        };
        assert!(validate_new_user(&req).is_empty());
    }

    #[test]
    fn non_unique_errors_pass_through_as_database_errors() {
        let err = map_customer_unique_violation(sqlx::Error::PoolClosed);
        assert!(matches!(err, crate::error::AppError::Database(_)));
    }
}
