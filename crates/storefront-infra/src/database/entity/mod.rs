//! SeaORM entities.

pub mod favorite;
pub mod order;
pub mod store;
pub mod user;
