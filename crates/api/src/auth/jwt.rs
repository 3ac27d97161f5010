//! Dashboard session tokens.
//!
//! Sessions carry an HS256-signed token whose claims name the dashboard
//! user and their festival [`Role`]. The role is decoded straight into the
//! enum, so a token naming any other role fails validation as a whole.

use festival_core::roles::{Permissions, Role};
use festival_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SECRET_VAR: &str = "JWT_SECRET";
const EXPIRY_VAR: &str = "JWT_ACCESS_EXPIRY_MINS";

/// Session lifetime when `JWT_ACCESS_EXPIRY_MINS` is unset.
const DEFAULT_SESSION_MINS: i64 = 60;

/// Payload of a dashboard session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Dashboard user id at the identity provider.
    pub sub: DbId,
    pub role: Role,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    pub iat: i64,
    /// Per-session id, logged with dashboard edits.
    pub jti: String,
}

impl Claims {
    /// A session for `user_id` starting now and lasting `minutes`.
    pub fn new(user_id: DbId, role: Role, minutes: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            sub: user_id,
            role,
            exp: iat + minutes * 60,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::for_role(self.role)
    }
}

/// Signing settings shared with the festival's identity provider.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of sessions minted by [`issue_access_token`].
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY_MINS`
    /// (default 60).
    ///
    /// # Panics
    ///
    /// Panics at startup if the secret is missing or empty, or if the
    /// expiry is not a whole number.
    pub fn from_env() -> Self {
        let secret = std::env::var(SECRET_VAR).expect("JWT_SECRET must be set in the environment");
        assert!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins = match std::env::var(EXPIRY_VAR) {
            Ok(raw) => raw
                .trim()
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_SESSION_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// Sign a session token for a dashboard user.
pub fn issue_access_token(
    user_id: DbId,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, role, config.access_token_expiry_mins);
    encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key())
}

/// Check a session token's signature and expiry and decode its claims.
///
/// Tokens whose role is not one of the dashboard roles are rejected here.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);
    decode::<Claims>(token, &config.decoding_key(), &validation).map(|data| data.claims)
}
