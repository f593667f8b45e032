//! Database connection management and the SeaORM credential store.

mod connections;
pub mod entity;
mod user_repo;

pub use connections::{DatabaseConfig, connect};
pub use user_repo::PostgresUserRepository;

#[cfg(test)]
mod tests;
