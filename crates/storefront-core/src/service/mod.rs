//! Domain services.

mod auth;

pub use auth::{AuthOutcome, AuthService, Credentials, OAuthProfile};
