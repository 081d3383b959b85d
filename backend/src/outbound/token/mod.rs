//! HS256 bearer credentials implementing the [`TokenService`] port.
//!
//! Claims are limited to `sub` (the user id), `iat`, and `exp`. Expiry is
//! checked against an injected [`Clock`] rather than the system time so tests
//! can move time forward.

pub mod config;
pub mod fingerprint;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::DateTime;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::{IssuedToken, TokenError, TokenService};

pub use config::{BuildMode, TokenConfigError, TokenKey, TokenSettings, token_settings_from_env};
pub use fingerprint::key_fingerprint;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// JSON Web Token signer and verifier.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service from validated settings using the system clock.
    pub fn new(settings: &TokenSettings) -> Result<Self, TokenError> {
        Self::with_clock(settings, Arc::new(DefaultClock))
    }

    /// Build a service that reads the time from `clock`.
    pub fn with_clock(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let ttl = chrono::Duration::from_std(settings.ttl)
            .map_err(|err| TokenError::signing(format!("token lifetime out of range: {err}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against `clock` after decoding.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_owned(), "sub".to_owned()]);

        Ok(Self {
            encoding: EncodingKey::from_secret(settings.key.as_bytes()),
            decoding: DecodingKey::from_secret(settings.key.as_bytes()),
            ttl,
            validation,
            clock,
        })
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::bad_signature(),
        ErrorKind::ExpiredSignature => TokenError::expired(),
        _ => TokenError::malformed(error.to_string()),
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.utc().timestamp();
        let exp = issued_at + self.ttl.num_seconds();
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| TokenError::signing("expiry out of range"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at,
            exp,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(map_decode_error)?;

        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::expired());
        }

        UserId::new(&data.claims.sub)
            .map_err(|err| TokenError::malformed(format!("invalid subject: {err}")))
    }
}
