//! Ledger and repository traits
//!
//! Async interfaces over the durable store. The nonce and session ledgers
//! are the source of truth for one-time and revocable credentials; the
//! user and job repositories are straight-line data access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobtrack_types::UserProfile;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{JobRow, UserRow};

/// Durable single-use registry of issued login nonces.
///
/// Existence of a row is the signal: "this nonce was issued and has not
/// yet been consumed."
#[async_trait]
pub trait NonceLedger: Send + Sync {
    /// Register a freshly issued nonce
    async fn register(
        &self,
        nonce: &str,
        request_url: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()>;

    /// Atomically check for the nonce and delete it.
    ///
    /// Returns `true` if the nonce existed and was removed by this call.
    /// A nonce that never existed and one that was already consumed both
    /// return `false`; the two cases are indistinguishable. Concurrent
    /// callers racing on the same nonce see exactly one `true`.
    async fn consume(&self, nonce: &str) -> DbResult<bool>;

    /// Remove nonces past their expiry, returning the number deleted
    async fn delete_expired(&self) -> DbResult<u64>;
}

/// Durable registry of currently-valid sessions, keyed by token hash.
#[async_trait]
pub trait SessionLedger: Send + Sync {
    /// Register a newly issued session
    async fn register(
        &self,
        token_hash: &str,
        login: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()>;

    /// Pure existence check; no deletion
    async fn is_active(&self, token_hash: &str) -> DbResult<bool>;

    /// Delete the session row. Idempotent: revoking an already-revoked
    /// or unknown session is not an error.
    async fn revoke(&self, token_hash: &str) -> DbResult<()>;
}

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the profile, or update display attributes if the login exists
    async fn upsert(&self, profile: &UserProfile) -> DbResult<UserRow>;

    /// Find a user by provider login
    async fn find_by_login(&self, login: &str) -> DbResult<Option<UserRow>>;
}

/// Job repository trait
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Create a new job record
    async fn create(&self, job: CreateJob) -> DbResult<JobRow>;

    /// All jobs belonging to a login
    async fn find_all(&self, login: &str) -> DbResult<Vec<JobRow>>;

    /// A single job, scoped to its owner
    async fn find_by_id(&self, login: &str, id: Uuid) -> DbResult<Option<JobRow>>;

    /// Delete a job, scoped to its owner; idempotent
    async fn delete(&self, login: &str, id: Uuid) -> DbResult<()>;

    /// Stamp the job as applied-to now, returning the updated row
    async fn mark_applied(&self, login: &str, id: Uuid) -> DbResult<Option<JobRow>>;
}

/// Create job input
#[derive(Debug, Clone)]
pub struct CreateJob {
    pub id: Uuid,
    pub user_login: String,
    pub title: String,
    pub employer: String,
    pub callout_url: Option<String>,
}
