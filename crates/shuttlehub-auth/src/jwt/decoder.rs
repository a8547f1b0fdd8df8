//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use shuttlehub_core::config::auth::AuthConfig;
use shuttlehub_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens.
///
/// This is the auth gateway's `validate(token) -> claims | Invalid`
/// operation, shared by the REST extractor and the WebSocket handshake.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use shuttlehub_core::error::ErrorKind;
    use shuttlehub_entity::user::UserRole;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_access_ttl_minutes: 60,
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());

        let user_id = Uuid::new_v4();
        let token = encoder
            .encode_access_token(user_id, UserRole::Driver, "Dana")
            .unwrap();

        let claims = decoder.decode_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.role, UserRole::Driver);
        assert_eq!(claims.name, "Dana");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let decoder = JwtDecoder::new(&config());
        let err = decoder.decode_access_token("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&config());
        let other = AuthConfig {
            jwt_secret: "different-secret".to_string(),
            jwt_access_ttl_minutes: 60,
        };
        let decoder = JwtDecoder::new(&other);

        let token = encoder
            .encode_access_token(Uuid::new_v4(), UserRole::Student, "Sam")
            .unwrap();
        let err = decoder.decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
