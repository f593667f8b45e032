//! Authentication ports.

use uuid::Uuid;

/// A freshly signed access/refresh token pair.
///
/// The access token is short-lived and authorizes individual requests; the
/// refresh token is long-lived and is exchanged for new pairs. Neither is
/// persisted server-side.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Claims decoded from a signed token. The user id is the only identity
/// claim a token carries.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Token service trait for signing and verifying token pairs.
pub trait TokenService: Send + Sync {
    /// Sign a new access/refresh pair for a user.
    fn issue_tokens(&self, user_id: Uuid) -> Result<TokenPair, AuthError>;

    /// Validate and decode an access token.
    fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Validate and decode a refresh token.
    fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
