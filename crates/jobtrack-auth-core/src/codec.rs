//! Signed token encoding and decoding
//!
//! All tokens the server issues go through [`TokenCodec`]: HS256 JWTs
//! (`header.claims.signature`, URL-safe) signed with a process-wide
//! secret. The algorithm allow-list is fixed to HS256; a token whose
//! header requests anything else is rejected before signature
//! verification, which closes the usual algorithm-confusion hole.
//!
//! Expiry claims are carried as RFC 3339 text at one-second resolution
//! so signer and verifier agree on a canonical format. The codec itself
//! never checks expiry; callers do that as an explicit second step,
//! which lets them distinguish "forged" from "expired but authentic".

use chrono::{DateTime, SecondsFormat, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Token encode/decode errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Input is not a well-formed token
    #[error("malformed token")]
    Malformed,

    /// Signature does not match the configured secret
    #[error("invalid token signature")]
    InvalidSignature,

    /// Header requests an algorithm outside the allow-list
    #[error("unsupported signing algorithm")]
    UnsupportedAlgorithm,

    /// The `exp` claim is not canonical RFC 3339 text
    #[error("expiry claim could not be parsed")]
    ExpiryParse,

    /// Claims could not be serialized
    #[error("token could not be encoded: {0}")]
    Encode(String),
}

/// Errors that can occur when creating a signing key
#[derive(Debug, Clone, Error)]
pub enum SigningKeyError {
    #[error("signing secret too short: got {actual} bytes, need at least {minimum}")]
    SecretTooShort { actual: usize, minimum: usize },
}

/// Pre-validated signing secret.
///
/// Constructed once at startup from configuration; there is no default.
/// A missing or too-short secret is a startup failure, never a fallback.
#[derive(Clone)]
pub struct SigningKey {
    secret: Arc<[u8]>,
}

impl SigningKey {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new signing key from secret bytes.
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than 32 bytes.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SigningKeyError> {
        let bytes = secret.as_ref();
        if bytes.len() < Self::MIN_SECRET_LENGTH {
            return Err(SigningKeyError::SecretTooShort {
                actual: bytes.len(),
                minimum: Self::MIN_SECRET_LENGTH,
            });
        }
        Ok(Self {
            secret: Arc::from(bytes),
        })
    }

    fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret_length", &self.secret.len())
            .finish_non_exhaustive()
    }
}

/// Symmetric codec for the server's signed tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from a pre-validated signing key
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is carried as RFC 3339 text and checked by the caller,
        // not by the numeric-exp machinery here.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = Default::default();

        Self {
            encoding: EncodingKey::from_secret(key.as_bytes()),
            decoding: DecodingKey::from_secret(key.as_bytes()),
            validation,
        }
    }

    /// Sign a claims set into compact token text
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Verify token text and deserialize its claims
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let data = jsonwebtoken::decode::<T>(token, &self.decoding, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnsupportedAlgorithm
                }
                _ => {
                    tracing::debug!("token decode failed: {}", e);
                    TokenError::Malformed
                }
            },
        )?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

/// Format an expiry timestamp as canonical RFC 3339 text (UTC, whole seconds)
pub(crate) fn format_expiry(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an `exp` claim, rejecting anything that is not canonical RFC 3339
pub(crate) fn parse_expiry(s: &str) -> Result<DateTime<Utc>, TokenError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TokenError::ExpiryParse)
}
