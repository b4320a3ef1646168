//! Login flow - ties together tokens, ledgers, and the identity provider
//!
//! The flow is the only writer of the nonce and session ledgers. All
//! cross-request state lives there; the flow itself holds no mutable
//! state and is shared freely across request tasks.

use chrono::Duration as ChronoDuration;
use jobtrack_db::{NonceLedger, SessionLedger, UserRepository};
use jobtrack_types::Login;
use std::sync::Arc;

use crate::codec::TokenCodec;
use crate::config::AuthConfig;
use crate::provider::IdentityProvider;
use crate::session::{ledger_key, SessionToken};
use crate::state::StateToken;
use crate::AuthError;

/// Orchestrates login, callback, logout, and per-request authorization.
pub struct LoginFlow<P, N, S, U>
where
    P: IdentityProvider,
    N: NonceLedger,
    S: SessionLedger,
    U: UserRepository,
{
    codec: TokenCodec,
    config: AuthConfig,
    provider: P,
    nonces: Arc<N>,
    sessions: Arc<S>,
    users: Arc<U>,
}

impl<P, N, S, U> LoginFlow<P, N, S, U>
where
    P: IdentityProvider,
    N: NonceLedger,
    S: SessionLedger,
    U: UserRepository,
{
    /// Create a new login flow
    pub fn new(
        config: AuthConfig,
        provider: P,
        nonces: Arc<N>,
        sessions: Arc<S>,
        users: Arc<U>,
    ) -> Self {
        Self {
            codec: TokenCodec::new(&config.signing_key),
            config,
            provider,
            nonces,
            sessions,
            users,
        }
    }

    fn state_lifetime(&self) -> ChronoDuration {
        ChronoDuration::seconds(self.config.state_lifetime.as_secs() as i64)
    }

    fn session_lifetime(&self) -> ChronoDuration {
        ChronoDuration::seconds(self.config.session_lifetime.as_secs() as i64)
    }

    /// Begin a login attempt.
    ///
    /// Issues a state token, registers its nonce, and returns the
    /// provider authorization URL to redirect the caller to. Any failure
    /// here aborts before a redirect is produced.
    pub async fn login(&self, request_url: &str) -> Result<String, AuthError> {
        let state = StateToken::issue(request_url, self.state_lifetime());

        self.nonces
            .register(&state.nonce, &state.request_url, state.expires_at)
            .await?;

        let token = state
            .tokenize(&self.codec)
            .map_err(|e| AuthError::Internal(format!("state token issue failed: {e}")))?;

        tracing::debug!(request_url, "login state issued");
        Ok(self.provider.authorize_url(&token))
    }

    /// Complete a login attempt from the provider callback.
    ///
    /// Returns the signed session token to hand back as the caller's
    /// bearer credential. The nonce is consumed before the provider
    /// exchange and is never rolled back: a failed exchange means the
    /// caller starts over with a fresh login.
    pub async fn callback(&self, state_text: &str, code: &str) -> Result<String, AuthError> {
        let state = StateToken::parse(&self.codec, state_text).map_err(|e| {
            tracing::debug!("callback state rejected: {}", e);
            AuthError::BadState
        })?;

        if state.is_expired() {
            tracing::debug!("callback state expired at {}", state.expires_at);
            return Err(AuthError::ExpiredState);
        }

        // Atomic check-and-delete. A replayed state, including a
        // legitimate double-submit, fails here. Never-issued and
        // already-consumed are indistinguishable on purpose.
        if !self.nonces.consume(&state.nonce).await? {
            tracing::debug!("callback nonce unknown or already consumed");
            return Err(AuthError::UnknownOrReplayedState);
        }

        let profile = self.provider.exchange(code).await.map_err(|e| {
            tracing::error!("provider exchange failed: {}", e);
            AuthError::ProviderExchange(e.to_string())
        })?;

        let session = SessionToken::issue(profile.login.clone(), self.session_lifetime());
        let token = session
            .tokenize(&self.codec)
            .map_err(|e| AuthError::Internal(format!("session token issue failed: {e}")))?;

        self.sessions
            .register(&ledger_key(&token), profile.login.as_str(), session.expires_at)
            .await?;
        self.users.upsert(&profile).await?;

        tracing::info!(login = %profile.login, "login completed");
        Ok(token)
    }

    /// Revoke the session for a bearer token.
    ///
    /// Idempotent: revoking an unknown or already-revoked session
    /// succeeds from the caller's perspective.
    pub async fn logout(&self, token_text: &str) -> Result<(), AuthError> {
        self.sessions.revoke(&ledger_key(token_text)).await?;
        Ok(())
    }

    /// Authorize a bearer token for a protected request.
    ///
    /// Ledger first: a token absent from the ledger is unauthorized
    /// whether it was never issued or revoked. A ledger-active token the
    /// codec then rejects is a consistency fault, not a client error.
    /// Expiry is re-checked here on every request.
    pub async fn authorize(&self, token_text: &str) -> Result<Login, AuthError> {
        if !self.sessions.is_active(&ledger_key(token_text)).await? {
            return Err(AuthError::Unauthorized);
        }

        let session = SessionToken::parse(&self.codec, token_text).map_err(|e| {
            tracing::error!("active session failed to parse: {}", e);
            AuthError::Internal("active session token rejected by codec".to_string())
        })?;

        if session.is_expired() {
            tracing::debug!(login = %session.login, "active session past expiry");
            return Err(AuthError::ExpiredSession);
        }

        Ok(session.login)
    }
}

impl<P, N, S, U> std::fmt::Debug for LoginFlow<P, N, S, U>
where
    P: IdentityProvider,
    N: NonceLedger,
    S: SessionLedger,
    U: UserRepository,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFlow")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
