//! JWT token creation.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use companyhub_core::config::AuthConfig;
use companyhub_core::error::AppError;
use companyhub_entity::{Role, User};

use super::claims::Claims;

/// Creates signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// `iss` claim value.
    issuer: String,
    /// `aud` claim value.
    audience: String,
    /// Token lifetime in minutes.
    expires_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expires_minutes", &self.expires_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            expires_minutes: config.jwt_expires_minutes as i64,
        }
    }

    /// Build the claims for a user without signing them.
    pub fn claims_for(&self, user: &User, roles: &[Role]) -> Claims {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.expires_minutes);
        Claims {
            sub: user.id,
            name: user.user_name.clone(),
            roles: roles.to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Sign an arbitrary set of claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }

    /// Generates an access token for the given user and roles.
    pub fn generate_token(&self, user: &User, roles: &[Role]) -> Result<String, AppError> {
        self.encode(&self.claims_for(user, roles))
    }
}
