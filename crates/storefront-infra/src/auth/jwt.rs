//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::ports::{AuthError, TokenClaims, TokenPair, TokenService};

/// Signing configuration, fixed at construction time.
///
/// Access and refresh tokens share one secret and algorithm and differ only
/// in lifetime: one hour for access tokens, seven days for refresh tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl: TimeDelta,
    pub refresh_ttl: TimeDelta,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_ttl: TimeDelta::hours(1),
            refresh_ttl: TimeDelta::days(7),
        }
    }
}

/// Internal JWT claims structure for serialization. The user id is the
/// only identity claim.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    iat: i64,
    exp: i64,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        // Warn if using default secret in production
        if secret == "change-me-in-production" {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self::new(JwtConfig {
            secret,
            ..JwtConfig::default()
        })
    }

    fn sign(&self, user_id: Uuid, ttl: TimeDelta) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            exp: token_data.claims.exp,
        })
    }
}

impl TokenService for JwtTokenService {
    fn issue_tokens(&self, user_id: Uuid) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, self.config.access_ttl)?,
            refresh_token: self.sign(user_id, self.config.refresh_ttl)?,
        })
    }

    fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.decode_claims(token)
    }

    fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.decode_claims(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            ..JwtConfig::default()
        }
    }

    #[test]
    fn test_issued_pair_decodes_to_user_id() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let pair = service.issue_tokens(user_id).unwrap();

        assert_eq!(
            service.verify_access_token(&pair.access_token).unwrap().user_id,
            user_id
        );
        assert_eq!(
            service
                .verify_refresh_token(&pair.refresh_token)
                .unwrap()
                .user_id,
            user_id
        );
    }

    #[test]
    fn test_token_lifetimes() {
        let service = JwtTokenService::new(test_config());
        let before = Utc::now().timestamp();

        let pair = service.issue_tokens(Uuid::new_v4()).unwrap();
        let access = service.verify_access_token(&pair.access_token).unwrap();
        let refresh = service.verify_refresh_token(&pair.refresh_token).unwrap();

        let hour = TimeDelta::hours(1).num_seconds();
        let week = TimeDelta::days(7).num_seconds();

        // Issuance happened between `before` and now.
        let after = Utc::now().timestamp();
        assert!(access.exp >= before + hour && access.exp <= after + hour);
        assert!(refresh.exp >= before + week && refresh.exp <= after + week);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            access_ttl: TimeDelta::hours(-2),
            refresh_ttl: TimeDelta::hours(-2),
        });

        let pair = service.issue_tokens(Uuid::new_v4()).unwrap();

        let result = service.verify_refresh_token(&pair.refresh_token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let service = JwtTokenService::new(test_config());

        let result = service.verify_refresh_token("not-a-jwt");

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let signer = JwtTokenService::new(JwtConfig {
            secret: "secret-one".to_string(),
            ..JwtConfig::default()
        });
        let verifier = JwtTokenService::new(JwtConfig {
            secret: "secret-two".to_string(),
            ..JwtConfig::default()
        });

        let pair = signer.issue_tokens(Uuid::new_v4()).unwrap();

        let result = verifier.verify_refresh_token(&pair.refresh_token);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}
