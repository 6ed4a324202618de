//! PostgreSQL implementation of the token repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{NewShopToken, ShopToken, TokenOverview};
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

/// PostgreSQL repository for shop tokens.
///
/// Queries are runtime-checked (`sqlx::query`) so the crate builds
/// without a reachable database.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_token(row: &sqlx::postgres::PgRow) -> Result<ShopToken, sqlx::Error> {
    Ok(ShopToken {
        token: row.try_get("token")?,
        shop_id: row.try_get("shop_id")?,
        description: row.try_get("description")?,
        expires_at: row.try_get("expires_at")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn insert(&self, token: &NewShopToken) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO shop_tokens (token, shop_id, description, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&token.token)
        .bind(&token.shop_id)
        .bind(&token.description)
        .bind(token.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn update(&self, token: &NewShopToken) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE shop_tokens
            SET shop_id = $2, description = $3, expires_at = $4
            WHERE token = $1
            "#,
        )
        .bind(&token.token)
        .bind(&token.shop_id)
        .bind(&token.description)
        .bind(token.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<Option<Vec<String>>, AppError> {
        let mut tx = self.pool.begin().await?;

        let image_ids: Vec<String> =
            sqlx::query_scalar("SELECT image_id FROM images WHERE token = $1 ORDER BY created_at")
                .bind(token)
                .fetch_all(&mut *tx)
                .await?;

        // images and sub_items cascade from the token row.
        let result = sqlx::query("DELETE FROM shop_tokens WHERE token = $1")
            .bind(token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            Ok(None)
        } else {
            Ok(Some(image_ids))
        }
    }

    async fn find(&self, token: &str) -> Result<Option<ShopToken>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT token, shop_id, description, expires_at, created_at
            FROM shop_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|r| row_to_token(&r)).transpose().map_err(Into::into)
    }

    async fn exists(&self, token: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 FROM shop_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.is_some())
    }

    async fn shop_id_owner(&self, shop_id: &str) -> Result<Option<String>, AppError> {
        let owner = sqlx::query_scalar("SELECT token FROM shop_tokens WHERE shop_id = $1")
            .bind(shop_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(owner)
    }

    async fn list_overview(&self) -> Result<Vec<TokenOverview>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT t.token, t.shop_id, t.description, t.expires_at, t.created_at,
                   (SELECT COUNT(*) FROM sub_items s WHERE s.token = t.token) AS items_count,
                   (SELECT COUNT(*) FROM images i WHERE i.token = t.token) AS images_count
            FROM shop_tokens t
            ORDER BY t.token
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(TokenOverview {
                    token: row_to_token(row)?,
                    items_count: row.try_get("items_count")?,
                    images_count: row.try_get("images_count")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }
}
