//! PostgreSQL implementation of the panel session repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// PostgreSQL repository for admin panel session ids.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn insert(&self, session_id: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO admin_sessions (session_id) VALUES ($1)")
            .bind(session_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn exists(&self, session_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 FROM admin_sessions WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.is_some())
    }
}
