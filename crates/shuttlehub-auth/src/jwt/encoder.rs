//! JWT token minting.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use shuttlehub_core::config::auth::AuthConfig;
use shuttlehub_core::error::AppError;
use shuttlehub_entity::user::UserRole;

use super::claims::Claims;

/// Mints HS256 access tokens.
///
/// In production the identity service is the issuer of record; this encoder
/// exists for operational tooling and tests, signed with the same secret.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime in minutes.
    access_ttl_minutes: u64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes,
        }
    }

    /// Mints an access token for the given user.
    pub fn encode_access_token(
        &self,
        user_id: Uuid,
        role: UserRole,
        name: &str,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.access_ttl_minutes as i64)).timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }
}
