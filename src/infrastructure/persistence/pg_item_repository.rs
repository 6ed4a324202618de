//! PostgreSQL implementation of the item repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{ItemSummary, NewSubItem, SubItem};
use crate::domain::repositories::ItemRepository;
use crate::error::AppError;

/// PostgreSQL repository for registered sub-items.
pub struct PgItemRepository {
    pool: Arc<PgPool>,
}

impl PgItemRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Maps an empty column value to "not specified" for the wire format.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn insert(&self, item: &NewSubItem) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sub_items (token, item_id, color, size, kind, d1, d2, d3, d4, d5, image_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&item.token)
        .bind(&item.item_id)
        .bind(&item.color)
        .bind(&item.size)
        .bind(&item.kind)
        .bind(item.dims[0])
        .bind(item.dims[1])
        .bind(item.dims[2])
        .bind(item.dims[3])
        .bind(item.dims[4])
        .bind(&item.image_ids)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_for_token(&self, token: &str) -> Result<Vec<ItemSummary>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT item_id, color, size, kind, d1, d2, d3, d4, d5, image_ids
            FROM sub_items
            WHERE token = $1
            ORDER BY id
            "#,
        )
        .bind(token)
        .fetch_all(self.pool.as_ref())
        .await?;

        // Group consecutive-or-not rows by (item_id, color, size) while
        // keeping first-seen order, matching the panel's tree layout.
        let mut summaries: Vec<ItemSummary> = Vec::new();
        for row in rows {
            let item_id: String = row.try_get("item_id").map_err(AppError::from)?;
            let color: String = row.try_get("color").map_err(AppError::from)?;
            let size: String = row.try_get("size").map_err(AppError::from)?;

            let sub = SubItem {
                kind: row.try_get("kind").map_err(AppError::from)?,
                d1: row.try_get("d1").map_err(AppError::from)?,
                d2: row.try_get("d2").map_err(AppError::from)?,
                d3: row.try_get("d3").map_err(AppError::from)?,
                d4: row.try_get("d4").map_err(AppError::from)?,
                d5: row.try_get("d5").map_err(AppError::from)?,
                image_list: row.try_get("image_ids").map_err(AppError::from)?,
            };

            let color = non_empty(color);
            let size = non_empty(size);

            match summaries
                .iter_mut()
                .find(|s| s.item_id == item_id && s.color == color && s.size == size)
            {
                Some(summary) => summary.items.push(sub),
                None => summaries.push(ItemSummary {
                    item_id,
                    color,
                    size,
                    items: vec![sub],
                }),
            }
        }

        Ok(summaries)
    }

    async fn image_ids_for_item(
        &self,
        token: &str,
        item_id: &str,
        color: &str,
        size: &str,
    ) -> Result<Vec<String>, AppError> {
        let lists: Vec<Vec<String>> = sqlx::query_scalar(
            r#"
            SELECT image_ids
            FROM sub_items
            WHERE token = $1 AND item_id = $2 AND color = $3 AND size = $4
            ORDER BY id
            "#,
        )
        .bind(token)
        .bind(item_id)
        .bind(color)
        .bind(size)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lists.into_iter().flatten().collect())
    }
}
