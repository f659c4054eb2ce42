//! Session token validation.
//!
//! The external authentication provider mints HS256 tokens with a shared
//! secret; this service checks signature and expiry and hands back the
//! claims. `issue_token` exists so development setups and tests can mint
//! their own.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;

/// Session token configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key shared with the authentication provider.
    pub secret: String,
    /// Token expiration in minutes (development token minting only).
    pub token_expires_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            token_expires_minutes: 60,
        }
    }
}

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token is malformed or its signature does not verify.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// Validates session tokens issued by the authentication provider.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a new token service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
            validation: Validation::default(),
        }
    }

    /// Issues a session token for a user.
    ///
    /// Production tokens come from the authentication provider; this is
    /// for local development and tests.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue_token(&self, user_id: Uuid, role: &str) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::minutes(self.config.token_expires_minutes);
        let claims = Claims::new(user_id, role, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a session token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` for an expired token and
    /// `JwtError::DecodingError` for anything else the token can be
    /// wrong about.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
                Err(JwtError::Expired)
            }
            Err(e) => Err(JwtError::DecodingError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_secret(secret: &str) -> JwtService {
        JwtService::new(JwtConfig {
            secret: secret.to_string(),
            token_expires_minutes: 60,
        })
    }

    #[test]
    fn test_round_trip() {
        let service = service_with_secret("test-secret-key");
        let user_id = Uuid::new_v4();

        let token = service.issue_token(user_id, "treasurer").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.role, "treasurer");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = service_with_secret("test-secret-key");
        assert!(matches!(
            service.validate_token("not.a.token"),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = service_with_secret("secret-one");
        let verifier = service_with_secret("secret-two");

        let token = issuer.issue_token(Uuid::new_v4(), "admin").unwrap();
        assert!(matches!(
            verifier.validate_token(&token),
            Err(JwtError::DecodingError(_))
        ));
    }
}
