//! Application state - shared across all handlers.

use std::sync::Arc;

use storefront_core::domain::{User, UserWithRelations};
use storefront_core::error::RepoError;
use storefront_core::ports::{PasswordService, TokenService, UserRepository};
use storefront_core::service::AuthService;
use storefront_infra::database::connect;
use storefront_infra::{Argon2PasswordService, JwtTokenService, PostgresUserRepository};

use crate::config::AppConfig;
use crate::session::{CookieConfig, SessionCookieManager};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub cookies: SessionCookieManager,
}

/// In-memory user repository for when the database is not configured.
pub struct InMemoryUserRepository;

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, _id: uuid::Uuid) -> Result<Option<UserWithRelations>, RepoError> {
        tracing::warn!("Database not configured - using in-memory fallback");
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<UserWithRelations>, RepoError> {
        Ok(None)
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        Ok(user)
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let users: Arc<dyn UserRepository> = match &config.database {
            Some(db_config) => match connect(db_config).await {
                Ok(conn) => Arc::new(PostgresUserRepository::new(conn)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryUserRepository)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryUserRepository)
            }
        };

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let cookies = SessionCookieManager::new(CookieConfig::from_env());

        tracing::info!("Application state initialized");

        Self {
            auth: AuthService::new(users.clone(), passwords, tokens.clone()),
            users,
            tokens,
            cookies,
        }
    }
}
