//! Bearer token decoding.
//!
//! PlanHub's identity service issues HS256 tokens; this subsystem only
//! verifies them to resolve the acting user.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planhub_core::config::auth::AuthConfig;
use planhub_core::{AppError, AppResult};

/// Claims carried by a PlanHub access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's ID.
    pub sub: Uuid,
    /// The username.
    pub username: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Decode and validate an access token against the configured secret.
pub fn decode_access_token(config: &AuthConfig, token: &str) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid access token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            issuer: None,
        }
    }

    fn mint(secret: &str, exp: i64) -> String {
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "alice".to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = mint("secret", exp);
        let claims = decode_access_token(&config("secret"), &token).unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = mint("secret", exp);
        assert!(decode_access_token(&config("other"), &token).is_err());
    }

    #[test]
    fn test_expired_rejected() {
        let exp = chrono::Utc::now().timestamp() - 3600;
        let token = mint("secret", exp);
        assert!(decode_access_token(&config("secret"), &token).is_err());
    }
}
