//! Anti-forgery state tokens
//!
//! A state token binds an OAuth callback to the login attempt that
//! initiated it: the originating URL, a single-use random nonce, and an
//! expiry. It travels to the identity provider as the opaque `state`
//! parameter and comes back on the callback.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::codec::{format_expiry, parse_expiry, TokenCodec, TokenError};

/// Anti-CSRF state for one login attempt.
///
/// Created once per attempt, consumed exactly once at callback time,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateToken {
    /// URL the caller wanted before being sent to the provider
    pub request_url: String,
    /// Single-use random value, 32 bytes base64url-encoded
    pub nonce: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct StateClaims {
    request_url: String,
    nonce: String,
    exp: String,
}

impl StateToken {
    /// Issue a fresh state token for a login attempt.
    ///
    /// The nonce comes from the OS CSPRNG: 256 bits before encoding.
    pub fn issue(request_url: impl Into<String>, lifetime: Duration) -> Self {
        let random_bytes: [u8; 32] = rand::rng().random();
        Self {
            request_url: request_url.into(),
            nonce: URL_SAFE_NO_PAD.encode(random_bytes),
            expires_at: Utc::now() + lifetime,
        }
    }

    /// Sign into compact token text
    pub fn tokenize(&self, codec: &TokenCodec) -> Result<String, TokenError> {
        codec.encode(&StateClaims {
            request_url: self.request_url.clone(),
            nonce: self.nonce.clone(),
            exp: format_expiry(self.expires_at),
        })
    }

    /// Verify token text and reconstruct the state.
    ///
    /// A successful parse does not mean the token is still valid; callers
    /// must check [`StateToken::is_expired`] separately. That separation
    /// distinguishes "forged or corrupted" from "expired but authentic".
    pub fn parse(codec: &TokenCodec, token: &str) -> Result<Self, TokenError> {
        let claims: StateClaims = codec.decode(token)?;
        Ok(Self {
            request_url: claims.request_url,
            nonce: claims.nonce,
            expires_at: parse_expiry(&claims.exp)?,
        })
    }

    /// Whether the expiry has passed
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SigningKey;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SigningKey::new("0123456789abcdef0123456789abcdef").unwrap())
    }

    #[test]
    fn test_issue_generates_unique_nonces() {
        let a = StateToken::issue("/dashboard", Duration::hours(24));
        let b = StateToken::issue("/dashboard", Duration::hours(24));
        assert_ne!(a.nonce, b.nonce);
        // 32 bytes -> 43 base64url chars, no padding
        assert_eq!(a.nonce.len(), 43);
        assert!(!a.is_expired());
    }

    #[test]
    fn test_tokenize_parse_roundtrip() {
        let codec = codec();
        let state = StateToken::issue("/dashboard", Duration::hours(24));

        let token = state.tokenize(&codec).unwrap();
        let parsed = StateToken::parse(&codec, &token).unwrap();

        assert_eq!(parsed.request_url, state.request_url);
        assert_eq!(parsed.nonce, state.nonce);
        // RFC 3339 carries whole seconds; sub-second precision is dropped
        assert_eq!(
            parsed.expires_at.timestamp(),
            state.expires_at.timestamp()
        );
    }

    #[test]
    fn test_parse_succeeds_for_expired_token() {
        // Expired-but-authentic parses fine; the expiry check is separate
        let codec = codec();
        let state = StateToken::issue("/", Duration::hours(-1));
        let token = state.tokenize(&codec).unwrap();

        let parsed = StateToken::parse(&codec, &token).unwrap();
        assert!(parsed.is_expired());
    }

    #[test]
    fn test_parse_rejects_bad_expiry_text() {
        #[derive(Serialize)]
        struct BadExp {
            request_url: String,
            nonce: String,
            exp: String,
        }

        let codec = codec();
        let token = codec
            .encode(&BadExp {
                request_url: "/".to_string(),
                nonce: "n".to_string(),
                exp: "tomorrow-ish".to_string(),
            })
            .unwrap();

        assert_eq!(
            StateToken::parse(&codec, &token).unwrap_err(),
            TokenError::ExpiryParse
        );
    }
}
