//! Auth errors

use thiserror::Error;

/// Authentication and authorization errors.
///
/// Validation failures (bad, expired, or replayed credentials) are
/// client-facing and map to 401 without detail beyond the category.
/// Provider and storage failures are server-facing, logged with context,
/// and surfaced as a generic internal failure.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Returned state could not be parsed or verified
    #[error("state token rejected")]
    BadState,

    /// State token is authentic but past its expiry
    #[error("state token expired")]
    ExpiredState,

    /// Nonce absent from the ledger: never issued, or already consumed
    #[error("unknown or replayed state")]
    UnknownOrReplayedState,

    /// Session token is authentic but past its expiry
    #[error("session expired")]
    ExpiredSession,

    /// Missing, revoked, or never-issued session credential
    #[error("unauthorized")]
    Unauthorized,

    /// Identity provider exchange failed
    #[error("provider exchange failed: {0}")]
    ProviderExchange(String),

    /// Ledger unavailable
    #[error("storage error: {0}")]
    Storage(String),

    /// Invariant violation, e.g. an active session the codec rejects
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadState
            | Self::ExpiredState
            | Self::UnknownOrReplayedState
            | Self::ExpiredSession
            | Self::Unauthorized => 401,
            Self::ProviderExchange(_) | Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Whether this is a client-facing validation failure
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == 401
    }
}

impl From<jobtrack_db::DbError> for AuthError {
    fn from(err: jobtrack_db::DbError) -> Self {
        tracing::error!("ledger error: {}", err);
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::BadState.status_code(), 401);
        assert_eq!(AuthError::ExpiredState.status_code(), 401);
        assert_eq!(AuthError::UnknownOrReplayedState.status_code(), 401);
        assert_eq!(AuthError::Unauthorized.status_code(), 401);
        assert_eq!(AuthError::ProviderExchange("x".into()).status_code(), 500);
        assert_eq!(AuthError::Storage("x".into()).status_code(), 500);
        assert_eq!(AuthError::Internal("x".into()).status_code(), 500);
    }
}
