//! Auth orchestration: login, registration, token refresh, OAuth upsert.
//!
//! Each operation runs to completion independently; the only shared state
//! between them is the credential store behind [`UserRepository`]. Every
//! successful operation mints a fresh token pair and leaves previously
//! issued tokens untouched - there is no revocation list, tokens stay valid
//! until natural expiry.

use std::sync::Arc;

use crate::domain::{NewUser, User, UserWithRelations};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Validated login/registration input. Input validation happens at the
/// transport edge; this layer assumes it already passed.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Profile received from an external identity provider after the provider
/// handshake has already been verified upstream.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Result of a successful auth operation.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: UserWithRelations,
    pub access_token: String,
    pub refresh_token: String,
}

/// Composes the credential store, password hasher and token service into
/// the four auth flows.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Authenticate with email and password.
    ///
    /// Fails with `NotFound` when no account carries the email and with
    /// `Unauthorized` when the password does not match the stored hash or
    /// the account was created without one (external-provider accounts).
    pub async fn login(&self, credentials: Credentials) -> Result<AuthOutcome, DomainError> {
        let found = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found!".to_string()))?;

        let hash = found
            .user
            .password_hash
            .as_deref()
            .ok_or(DomainError::Unauthorized)?;

        let valid = self
            .passwords
            .verify(&credentials.password, hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::Unauthorized);
        }

        self.issue_for(found)
    }

    /// Create an account and log it in.
    pub async fn register(&self, credentials: Credentials) -> Result<AuthOutcome, DomainError> {
        if self.users.find_by_email(&credentials.email).await?.is_some() {
            return Err(DomainError::Duplicate("The user already exists!".to_string()));
        }

        let password_hash = self
            .passwords
            .hash(&credentials.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(NewUser {
            email: credentials.email,
            name: credentials.name,
            password_hash: Some(password_hash),
            picture: None,
        });

        let created = self.users.create(user).await.map_err(create_error)?;
        self.issue_for(UserWithRelations::without_relations(created))
    }

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// Any verification failure (expired, malformed, bad signature) maps to
    /// `Unauthorized`; a user that vanished since issuance maps to
    /// `NotFound`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthOutcome, DomainError> {
        let claims = self
            .tokens
            .verify_refresh_token(refresh_token)
            .map_err(|_| DomainError::Unauthorized)?;

        let found = self
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found!".to_string()))?;

        self.issue_for(found)
    }

    /// Log in via an external identity provider, creating the account on
    /// first contact.
    ///
    /// Two racing first logins for the same new email are arbitrated by the
    /// store's unique-email constraint; the loser surfaces the conflict as
    /// a client error instead of crashing.
    pub async fn oauth_login(&self, profile: OAuthProfile) -> Result<AuthOutcome, DomainError> {
        if let Some(found) = self.users.find_by_email(&profile.email).await? {
            return self.issue_for(found);
        }

        let user = User::new(NewUser {
            email: profile.email,
            name: profile.name,
            password_hash: None,
            picture: profile.picture,
        });

        let created = self.users.create(user).await.map_err(create_error)?;
        self.issue_for(UserWithRelations::without_relations(created))
    }

    fn issue_for(&self, user: UserWithRelations) -> Result<AuthOutcome, DomainError> {
        let pair = self
            .tokens
            .issue_tokens(user.user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(AuthOutcome {
            user,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }
}

/// A uniqueness conflict during create means someone got there first; any
/// other store failure is reported without its cause detail.
fn create_error(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => DomainError::Duplicate("The user already exists!".to_string()),
        _ => DomainError::Validation("Could not create user".to_string()),
    }
}
