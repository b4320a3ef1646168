//! PostgreSQL user repository implementation

use async_trait::async_trait;
use jobtrack_types::UserProfile;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::UserRow;
use crate::repo::UserRepository;

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert(&self, profile: &UserProfile) -> DbResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, login, avatar_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (login) DO UPDATE
                SET avatar_url = EXCLUDED.avatar_url,
                    updated_at = NOW()
            RETURNING id, login, avatar_url, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile.login.as_str())
        .bind(&profile.avatar_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_login(&self, login: &str) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login, avatar_url, created_at, updated_at
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
