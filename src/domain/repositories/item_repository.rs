//! Repository trait for registered sub-items.

use crate::domain::entities::{ItemSummary, NewSubItem};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for item records.
///
/// A sub-item is unique per (token, item_id, color, size, kind); the
/// empty string stands for an unspecified color, size, or kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts a sub-item record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the sub-item key is already
    /// registered, [`AppError::Internal`] on database errors.
    async fn insert(&self, item: &NewSubItem) -> Result<(), AppError>;

    /// Lists a token's sub-items grouped into [`ItemSummary`] records,
    /// groups and sub-items both in insertion order.
    async fn list_for_token(&self, token: &str) -> Result<Vec<ItemSummary>, AppError>;

    /// Collects the image ids of every sub-item under (token, item_id,
    /// color, size), flattened in insertion order. Empty when nothing is
    /// registered under that key.
    async fn image_ids_for_item(
        &self,
        token: &str,
        item_id: &str,
        color: &str,
        size: &str,
    ) -> Result<Vec<String>, AppError>;
}
