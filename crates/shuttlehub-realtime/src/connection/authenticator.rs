//! WebSocket handshake authentication.
//!
//! The bearer credential is validated before the upgrade completes; a bad
//! token rejects the connection before any room join.

use std::sync::Arc;

use uuid::Uuid;

use shuttlehub_auth::jwt::JwtDecoder;
use shuttlehub_core::error::AppError;
use shuttlehub_entity::user::UserRole;

/// Authenticated connection info extracted from the token.
#[derive(Debug, Clone)]
pub struct AuthenticatedConnection {
    /// User ID.
    pub user_id: Uuid,
    /// User role.
    pub role: UserRole,
    /// Display name.
    pub name: String,
}

/// Authenticates WebSocket connections using bearer tokens.
#[derive(Clone)]
pub struct WsAuthenticator {
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for WsAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsAuthenticator").finish()
    }
}

impl WsAuthenticator {
    /// Creates a new WebSocket authenticator.
    pub fn new(decoder: Arc<JwtDecoder>) -> Self {
        Self { decoder }
    }

    /// Validates a connection token (typically from the query string).
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedConnection, AppError> {
        let claims = self.decoder.decode_access_token(token)?;

        Ok(AuthenticatedConnection {
            user_id: claims.user_id(),
            role: claims.role,
            name: claims.name,
        })
    }
}
