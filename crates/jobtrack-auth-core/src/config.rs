//! Configuration types for the auth core

use std::time::Duration;

use crate::codec::{SigningKey, SigningKeyError};

/// Auth core configuration.
///
/// The signing secret is explicit construction-time input; there is no
/// default and no runtime rotation. Rotation requires a restart and
/// invalidates all outstanding tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Pre-validated token signing key
    pub signing_key: SigningKey,
    /// Lifetime of anti-forgery state tokens
    pub state_lifetime: Duration,
    /// Lifetime of session tokens
    pub session_lifetime: Duration,
}

impl AuthConfig {
    /// Create a config from a signing secret.
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than 32 bytes; treat
    /// that as a startup failure.
    pub fn try_new(signing_secret: impl AsRef<[u8]>) -> Result<Self, SigningKeyError> {
        Ok(Self {
            signing_key: SigningKey::new(signing_secret)?,
            state_lifetime: Duration::from_secs(24 * 60 * 60),
            session_lifetime: Duration::from_secs(24 * 60 * 60),
        })
    }

    /// Set the state token lifetime
    pub fn with_state_lifetime(mut self, lifetime: Duration) -> Self {
        self.state_lifetime = lifetime;
        self
    }

    /// Set the session token lifetime
    pub fn with_session_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_lifetime = lifetime;
        self
    }
}
