//! Session tokens
//!
//! A session token is the credential returned after a successful login:
//! the subject's login name and an expiry, signed with the same codec as
//! state tokens. The session ledger stores a SHA-256 hash of the signed
//! text, never the credential itself.

use chrono::{DateTime, Duration, Utc};
use jobtrack_types::Login;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec::{format_expiry, parse_expiry, TokenCodec, TokenError};

/// Post-login identity credential.
///
/// Created once per successful login, presented on every protected
/// request, invalidated on logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Subject identifier (provider login name)
    pub login: Login,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct SessionClaims {
    login: String,
    exp: String,
}

impl SessionToken {
    /// Issue a session for an authenticated subject
    pub fn issue(login: Login, lifetime: Duration) -> Self {
        Self {
            login,
            expires_at: Utc::now() + lifetime,
        }
    }

    /// Sign into compact token text
    pub fn tokenize(&self, codec: &TokenCodec) -> Result<String, TokenError> {
        codec.encode(&SessionClaims {
            login: self.login.to_string(),
            exp: format_expiry(self.expires_at),
        })
    }

    /// Verify token text and reconstruct the session.
    ///
    /// Same two-phase contract as state tokens: parse, then check
    /// [`SessionToken::is_expired`] explicitly.
    pub fn parse(codec: &TokenCodec, token: &str) -> Result<Self, TokenError> {
        let claims: SessionClaims = codec.decode(token)?;
        Ok(Self {
            login: Login::new(claims.login),
            expires_at: parse_expiry(&claims.exp)?,
        })
    }

    /// Whether the expiry has passed
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Hash a signed token for ledger storage.
///
/// The ledger keys sessions by this value so the raw credential never
/// sits in the database.
pub fn ledger_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SigningKey;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SigningKey::new("0123456789abcdef0123456789abcdef").unwrap())
    }

    #[test]
    fn test_tokenize_parse_roundtrip() {
        let codec = codec();
        let session = SessionToken::issue(Login::new("octocat"), Duration::hours(24));

        let token = session.tokenize(&codec).unwrap();
        let parsed = SessionToken::parse(&codec, &token).unwrap();

        assert_eq!(parsed.login.as_str(), "octocat");
        assert_eq!(
            parsed.expires_at.timestamp(),
            session.expires_at.timestamp()
        );
        assert!(!parsed.is_expired());
    }

    #[test]
    fn test_expired_session_detected() {
        let session = SessionToken::issue(Login::new("octocat"), Duration::seconds(-1));
        assert!(session.is_expired());
    }

    #[test]
    fn test_ledger_key_deterministic() {
        let token = "some.signed.token";
        let k1 = ledger_key(token);
        let k2 = ledger_key(token);
        assert_eq!(k1, k2);
        // SHA-256 = 32 bytes = 64 hex chars
        assert_eq!(k1.len(), 64);
        assert_ne!(k1, ledger_key("another.signed.token"));
    }
}
