//! PostgreSQL implementations of the ledgers and repositories

mod job;
mod nonce;
mod session;
mod user;

pub use job::PgJobRepository;
pub use nonce::PgNonceLedger;
pub use session::PgSessionLedger;
pub use user::PgUserRepository;

use crate::pool::DbPool;
use std::sync::Arc;

/// Bundle of all repository implementations sharing one pool
#[derive(Clone)]
pub struct Repositories {
    pub nonces: Arc<PgNonceLedger>,
    pub sessions: Arc<PgSessionLedger>,
    pub users: Arc<PgUserRepository>,
    pub jobs: Arc<PgJobRepository>,
}

impl Repositories {
    /// Create repositories backed by the given pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            nonces: Arc::new(PgNonceLedger::new(pool.clone())),
            sessions: Arc::new(PgSessionLedger::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            jobs: Arc::new(PgJobRepository::new(pool)),
        }
    }
}
