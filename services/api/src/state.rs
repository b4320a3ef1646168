//! Application state

use std::ops::Deref;
use std::sync::Arc;

use jobtrack_auth_core::{GithubProvider, LoginFlow};
use jobtrack_db::pg::{PgNonceLedger, PgSessionLedger, PgUserRepository, Repositories};
use jobtrack_db::DbPool;

use crate::config::Config;

/// Type alias for the login flow with concrete ledger types
pub type LoginFlowImpl =
    LoginFlow<GithubProvider, PgNonceLedger, PgSessionLedger, PgUserRepository>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Login flow for state issuance, callback handling, and session checks
    pub flow: Arc<LoginFlowImpl>,
    /// Database repositories
    pub repos: Repositories,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(flow: LoginFlowImpl, repos: Repositories, pool: DbPool, config: Config) -> Self {
        Self {
            flow: Arc::new(flow),
            repos,
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        }
    }
}
