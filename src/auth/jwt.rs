use chrono::{Utc, Duration};
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use crate::error::AppError;

pub const DEFAULT_ROLE: &str = "ROLE_USER";
pub const TOKEN_LIFETIME_SECONDS: i64 = 8 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub roles: Vec<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Issues an HS256 bearer token for the given user. Every token carries at
/// least [`DEFAULT_ROLE`], whatever is stored on the user row.
pub fn sign_token(
    user_id: i64,
    username: &str,
    roles: &[String],
    secret: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(TOKEN_LIFETIME_SECONDS);
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        roles: with_default_role(roles),
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256)
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {e}")))
}

pub fn with_default_role(roles: &[String]) -> Vec<String> {
    let mut out: Vec<String> = roles.to_vec();
    if !out.iter().any(|r| r == DEFAULT_ROLE) {
        out.push(DEFAULT_ROLE.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trip() {
        let token = sign_token(42, "bilemo", &["ROLE_USER".to_string()], "secret").unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "bilemo");
        assert_eq!(claims.roles, vec!["ROLE_USER".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_token(1, "bilemo", &[], "secret-a").unwrap();
        assert!(verify_token(&token, "secret-b").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("not.a.jwt", "secret").is_err());
    }

    #[test]
    fn default_role_is_always_present() {
        let token = sign_token(7, "bare", &[], "secret").unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert!(claims.roles.contains(&DEFAULT_ROLE.to_string()));

        // and never duplicated
        let roles = with_default_role(&["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()]);
        assert_eq!(roles.iter().filter(|r| *r == DEFAULT_ROLE).count(), 1);
    }
}
