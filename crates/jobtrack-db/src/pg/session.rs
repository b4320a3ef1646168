//! PostgreSQL session ledger implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DbResult;
use crate::repo::SessionLedger;

/// PostgreSQL session ledger
#[derive(Clone)]
pub struct PgSessionLedger {
    pool: PgPool,
}

impl PgSessionLedger {
    /// Create a new session ledger
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionLedger for PgSessionLedger {
    async fn register(
        &self,
        token_hash: &str,
        login: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (token_hash, login, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token_hash)
        .bind(login)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_active(&self, token_hash: &str) -> DbResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM auth_sessions
                WHERE token_hash = $1 AND expires_at > NOW()
            )
            "#,
        )
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn revoke(&self, token_hash: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
