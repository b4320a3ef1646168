//! PostgreSQL job repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::JobRow;
use crate::repo::{CreateJob, JobRepository};

/// PostgreSQL job repository
#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    /// Create a new job repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn create(&self, job: CreateJob) -> DbResult<JobRow> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (id, user_login, title, employer, callout_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_login, title, employer, callout_url,
                      application_time, created_at
            "#,
        )
        .bind(job.id)
        .bind(&job.user_login)
        .bind(&job.title)
        .bind(&job.employer)
        .bind(&job.callout_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, login: &str) -> DbResult<Vec<JobRow>> {
        let jobs = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, user_login, title, employer, callout_url,
                   application_time, created_at
            FROM jobs
            WHERE user_login = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(login)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn find_by_id(&self, login: &str, id: Uuid) -> DbResult<Option<JobRow>> {
        let job = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, user_login, title, employer, callout_url,
                   application_time, created_at
            FROM jobs
            WHERE user_login = $1 AND id = $2
            "#,
        )
        .bind(login)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn delete(&self, login: &str, id: Uuid) -> DbResult<()> {
        sqlx::query("DELETE FROM jobs WHERE user_login = $1 AND id = $2")
            .bind(login)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_applied(&self, login: &str, id: Uuid) -> DbResult<Option<JobRow>> {
        let job = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET application_time = NOW()
            WHERE user_login = $1 AND id = $2
            RETURNING id, user_login, title, employer, callout_url,
                      application_time, created_at
            "#,
        )
        .bind(login)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }
}
