//! # Storefront Infrastructure
//!
//! Concrete implementations of the ports defined in `storefront-core`:
//! SeaORM-backed persistence, JWT signing and Argon2 password hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, PostgresUserRepository};
