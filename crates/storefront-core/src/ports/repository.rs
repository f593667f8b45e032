use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{User, UserWithRelations};
use crate::error::RepoError;

/// Credential store port.
///
/// Lookups include the user's related collections; uniqueness of `email`
/// is enforced by the store itself, not by this layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id, with related collections.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserWithRelations>, RepoError>;

    /// Find a user by email address, with related collections.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithRelations>, RepoError>;

    /// Persist a new user record.
    async fn create(&self, user: User) -> Result<User, RepoError>;
}
