//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login and registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl AuthRequest {
    /// Check the payload before it reaches the auth flows.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !looks_like_email(&self.email) {
            errors.push("Please provide a valid email address".to_string());
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            errors.push(format!(
                "Password must contain at least {MIN_PASSWORD_LEN} characters"
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Externally verified identity-provider profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthProfileRequest {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl OAuthProfileRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if looks_like_email(&self.email) {
            Ok(())
        } else {
            Err(vec!["Please provide a valid email address".to_string()])
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

/// Public view of a user, with the collections other subsystems attach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub favorites: Vec<FavoriteDto>,
    pub orders: Vec<OrderDto>,
    pub stores: Vec<StoreDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteDto {
    pub id: Uuid,
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: Uuid,
    pub total_cents: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDto {
    pub id: Uuid,
    pub title: String,
}

/// Response for every successful auth operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> AuthRequest {
        AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: None,
        }
    }

    #[test]
    fn accepts_valid_credentials() {
        assert!(request("a@x.com", "secret1").validate().is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        for email in ["", "no-at-sign", "@x.com", "a@nodot"] {
            let errors = request(email, "secret1").validate().unwrap_err();
            assert_eq!(errors.len(), 1, "{email}");
        }
    }

    #[test]
    fn rejects_short_password() {
        let errors = request("a@x.com", "five5").validate().unwrap_err();
        assert_eq!(errors, vec!["Password must contain at least 6 characters"]);
    }

    #[test]
    fn collects_all_violations() {
        let errors = request("nope", "x").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
