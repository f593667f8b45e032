use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Favorite, Order, Store};

/// User entity - an account on the storefront.
///
/// `password_hash` is `None` for accounts created through an external
/// identity provider; those accounts cannot log in with a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub picture: Option<String>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(fields: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: fields.email,
            name: fields.name,
            password_hash: fields.password_hash,
            picture: fields.picture,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user together with the collections other subsystems attach to it.
///
/// Lookups return these by inclusion; this crate never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithRelations {
    pub user: User,
    pub favorites: Vec<Favorite>,
    pub orders: Vec<Order>,
    pub stores: Vec<Store>,
}

impl UserWithRelations {
    /// Wrap a freshly created user; new accounts have no collections yet.
    pub fn without_relations(user: User) -> Self {
        Self {
            user,
            favorites: Vec::new(),
            orders: Vec::new(),
            stores: Vec::new(),
        }
    }
}
