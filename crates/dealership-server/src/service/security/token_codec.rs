//! Signed, time-boxed bearer tokens.
//!
//! [`TokenCodec`] signs an arbitrary JSON object into an HS256 token that
//! expires one hour after issuance, and verifies presented tokens without
//! consulting the store.

use std::fmt;
use std::sync::Arc;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utility::TRACING_TARGET_TOKEN_CODEC as TRACING_TARGET;
use crate::{Error, Result};

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME: SignedDuration = SignedDuration::from_hours(1);

/// Signing secret configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct TokenConfig {
    /// Shared secret used to sign and verify access tokens.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "token-secret", env = "ACCESS_TOKEN_SECRET")
    )]
    pub token_secret: String,
}

impl TokenConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
        }
    }

    /// Rejects an empty signing secret.
    pub fn validate(&self) -> Result<()> {
        if self.token_secret.trim().is_empty() {
            return Err(Error::config("access token secret cannot be empty"));
        }

        Ok(())
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("token_secret", &"***")
            .finish()
    }
}

/// Reasons a presented token is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The signature does not match the configured secret.
    #[error("token signature does not match")]
    InvalidSignature,
    /// The token is past its embedded expiry.
    #[error("token has expired")]
    Expired,
    /// The token cannot be parsed.
    #[error("token is malformed")]
    Malformed,
}

impl From<JwtError> for TokenError {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}

/// Decoded identity claims.
///
/// Every field of the signed payload round-trips unchanged; `iat` and `exp`
/// are always set by the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Fields submitted at signing time.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    /// Issued at, in seconds since the Unix epoch.
    pub iat: i64,
    /// Expires at, in seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// Returns the `email` claim if it is a string.
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }

    /// Returns the moment the token stops being accepted.
    pub fn expires_at(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.exp).ok()
    }
}

/// Signs and verifies access tokens.
#[derive(Clone)]
pub struct TokenCodec {
    inner: Arc<TokenCodecInner>,
}

struct TokenCodecInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from the configured secret.
    ///
    /// # Errors
    ///
    /// Fails when the secret is empty.
    pub fn from_config(config: &TokenConfig) -> Result<Self> {
        config.validate()?;

        let secret = config.token_secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "iat"]);

        let inner = TokenCodecInner {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        };

        tracing::debug!(target: TRACING_TARGET, "token codec initialized");
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a codec directly from a secret.
    pub fn new(token_secret: impl Into<String>) -> Result<Self> {
        Self::from_config(&TokenConfig::new(token_secret))
    }

    /// Signs `payload`, expiring one hour from now.
    pub fn issue(&self, payload: Map<String, Value>) -> Result<String> {
        self.issue_at(payload, Timestamp::now())
    }

    /// Signs `payload` as if it were issued at `issued_at`.
    pub fn issue_at(&self, mut payload: Map<String, Value>, issued_at: Timestamp) -> Result<String> {
        payload.remove("iat");
        payload.remove("exp");

        let expires_at = issued_at
            .checked_add(TOKEN_LIFETIME)
            .map_err(|e| Error::internal("token codec", "expiry out of range").with_source(e))?;

        let claims = Claims {
            payload,
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
        };

        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.inner.encoding_key).map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "failed to sign token");
            Error::auth("failed to sign token").with_source(e)
        })
    }

    /// Verifies the signature and expiry of `token` and decodes its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.inner.decoding_key, &self.inner.validation)?;
        Ok(data.claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
