//! Jobtrack DB - Database abstractions
//!
//! SQLx-based persistence layer. The auth core talks to the database only
//! through the ledger and repository traits defined here, so the backing
//! store is swappable (Postgres in production, in-memory mocks in tests).
//!
//! # Example
//!
//! ```rust,ignore
//! use jobtrack_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/jobtrack").await?;
//! let repos = Repositories::new(pool);
//!
//! let consumed = repos.nonces.consume("some-nonce").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;
