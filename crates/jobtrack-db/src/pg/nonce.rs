//! PostgreSQL nonce ledger implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DbResult;
use crate::repo::NonceLedger;

/// PostgreSQL nonce ledger
#[derive(Clone)]
pub struct PgNonceLedger {
    pool: PgPool,
}

impl PgNonceLedger {
    /// Create a new nonce ledger
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NonceLedger for PgNonceLedger {
    async fn register(
        &self,
        nonce: &str,
        request_url: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_nonces (nonce, request_url, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(nonce)
        .bind(request_url)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume(&self, nonce: &str) -> DbResult<bool> {
        // Single-statement check-and-delete: two concurrent callers with
        // the same nonce get exactly one rows_affected == 1.
        let result = sqlx::query("DELETE FROM auth_nonces WHERE nonce = $1")
            .bind(nonce)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM auth_nonces WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
