//! Refresh-token session cookie management.

use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};

/// Name of the cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshtoken";

/// Cookie lifetime in days. Shorter than the refresh token's own seven-day
/// validity: once the cookie lapses the client must log in again even
/// though the token it carried would still verify.
const COOKIE_TTL_DAYS: i64 = 1;

/// Cookie attributes fixed at startup.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub domain: Option<String>,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            domain: std::env::var("COOKIE_DOMAIN").ok(),
        }
    }
}

/// Builds the refresh-token cookie with its fixed security attributes:
/// HttpOnly, Secure and SameSite=None so the storefront can run on a
/// separate origin.
#[derive(Clone)]
pub struct SessionCookieManager {
    config: CookieConfig,
}

impl SessionCookieManager {
    pub fn new(config: CookieConfig) -> Self {
        Self { config }
    }

    /// Cookie carrying a freshly issued refresh token.
    pub fn refresh_cookie(&self, refresh_token: &str) -> Cookie<'static> {
        self.build(
            refresh_token.to_owned(),
            OffsetDateTime::now_utc() + Duration::days(COOKIE_TTL_DAYS),
        )
    }

    /// Empty cookie expiring at the epoch; attaching it deletes the
    /// session on the client.
    pub fn clear_cookie(&self) -> Cookie<'static> {
        self.build(String::new(), OffsetDateTime::UNIX_EPOCH)
    }

    fn build(&self, value: String, expires: OffsetDateTime) -> Cookie<'static> {
        let mut builder = Cookie::build(REFRESH_TOKEN_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .expires(expires);

        if let Some(domain) = &self.config.domain {
            builder = builder.domain(domain.clone());
        }

        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Expiration;

    use super::*;

    fn manager() -> SessionCookieManager {
        SessionCookieManager::new(CookieConfig {
            domain: Some("shop.example.com".to_string()),
        })
    }

    fn expiry(cookie: &Cookie<'_>) -> OffsetDateTime {
        match cookie.expires().unwrap() {
            Expiration::DateTime(dt) => dt,
            Expiration::Session => panic!("expected an explicit expiry"),
        }
    }

    #[test]
    fn refresh_cookie_carries_token_with_security_attributes() {
        let cookie = manager().refresh_cookie("some-refresh-token");

        assert_eq!(cookie.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "some-refresh-token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.domain(), Some("shop.example.com"));

        let expires = expiry(&cookie);
        let now = OffsetDateTime::now_utc();
        assert!(expires > now + Duration::hours(23));
        assert!(expires <= now + Duration::days(1));
    }

    #[test]
    fn clear_cookie_is_empty_and_already_expired() {
        let cookie = manager().clear_cookie();

        assert_eq!(cookie.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "");
        assert!(expiry(&cookie) < OffsetDateTime::now_utc());
    }

    #[test]
    fn domain_is_omitted_when_not_configured() {
        let manager = SessionCookieManager::new(CookieConfig { domain: None });

        assert_eq!(manager.refresh_cookie("t").domain(), None);
    }
}
