//! PostgreSQL implementation of the image ownership repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::ImageRepository;
use crate::error::AppError;

/// PostgreSQL repository mapping image ids to their owning token.
pub struct PgImageRepository {
    pool: Arc<PgPool>,
}

impl PgImageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn insert(&self, image_id: &str, token: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO images (image_id, token) VALUES ($1, $2)")
            .bind(image_id)
            .bind(token)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn owner(&self, image_id: &str) -> Result<Option<String>, AppError> {
        let owner = sqlx::query_scalar("SELECT token FROM images WHERE image_id = $1")
            .bind(image_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(owner)
    }

    async fn all_exist(&self, image_ids: &[String]) -> Result<bool, AppError> {
        let known: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE image_id = ANY($1)")
                .bind(image_ids)
                .fetch_one(self.pool.as_ref())
                .await?;

        // ANY($1) deduplicates; duplicate ids in the request are allowed
        // as long as every distinct id is known.
        let distinct = image_ids
            .iter()
            .collect::<std::collections::HashSet<_>>()
            .len();

        Ok(known as usize == distinct)
    }
}
