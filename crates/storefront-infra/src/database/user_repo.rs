//! SeaORM credential store implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter};
use uuid::Uuid;

use storefront_core::domain::{User, UserWithRelations};
use storefront_core::error::RepoError;
use storefront_core::ports::UserRepository;

use super::entity::{favorite, order, store, user};

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Load the collections attached to a user, one query per collection.
    async fn with_relations(&self, model: user::Model) -> Result<UserWithRelations, RepoError> {
        let favorites = model
            .find_related(favorite::Entity)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        let orders = model
            .find_related(order::Entity)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        let stores = model
            .find_related(store::Entity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(UserWithRelations {
            user: model.into(),
            favorites: favorites.into_iter().map(Into::into).collect(),
            orders: orders.into_iter().map(Into::into).collect(),
            stores: stores.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserWithRelations>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        match result {
            Some(model) => Ok(Some(self.with_relations(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithRelations>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        match result {
            Some(model) => Ok(Some(self.with_relations(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();

        let model = active.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Email already registered".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(model.into())
    }
}

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Mask an email for logging to avoid PII in logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}
