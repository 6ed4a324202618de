//! Item registration and lookup for the shop API and the panel listing.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{ItemSummary, NewSubItem};
use crate::domain::repositories::{ImageRepository, ItemRepository, TokenRepository};
use crate::error::AppError;

/// Outcome of a sub-item registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    /// Rejected by the image-list or uniqueness rules; the API answers
    /// `invalid_request`.
    Invalid,
}

/// Service for registering sub-items and serving item lookups.
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
    images: Arc<dyn ImageRepository>,
    tokens: Arc<dyn TokenRepository>,
    max_images_per_item: usize,
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(
        items: Arc<dyn ItemRepository>,
        images: Arc<dyn ImageRepository>,
        tokens: Arc<dyn TokenRepository>,
        max_images_per_item: usize,
    ) -> Self {
        Self {
            items,
            images,
            tokens,
            max_images_per_item,
        }
    }

    /// Registers a sub-item.
    ///
    /// Invalid when the image list is empty, longer than the configured
    /// maximum, references an unknown image id, or the sub-item key is
    /// already registered.
    pub async fn register(&self, item: &NewSubItem) -> Result<RegisterOutcome, AppError> {
        if item.image_ids.is_empty() || item.image_ids.len() > self.max_images_per_item {
            return Ok(RegisterOutcome::Invalid);
        }

        if !self.images.all_exist(&item.image_ids).await? {
            return Ok(RegisterOutcome::Invalid);
        }

        match self.items.insert(item).await {
            Ok(()) => Ok(RegisterOutcome::Registered),
            Err(e) if e.is_conflict() => Ok(RegisterOutcome::Invalid),
            Err(e) => Err(e),
        }
    }

    /// Lists a token's items for the panel tree.
    pub async fn list_for_token(&self, token: &str) -> Result<Vec<ItemSummary>, AppError> {
        self.items.list_for_token(token).await
    }

    /// Looks up the image ids registered under (shop, item, color, size).
    ///
    /// `None` when the shop is unknown, its token has expired, or
    /// nothing is registered under the key — the API answers
    /// `invalid_id` in all three cases.
    pub async fn images_for(
        &self,
        shop_id: &str,
        item_id: &str,
        color: &str,
        size: &str,
    ) -> Result<Option<Vec<String>>, AppError> {
        let Some(token) = self.tokens.shop_id_owner(shop_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().timestamp();
        let live = self
            .tokens
            .find(&token)
            .await?
            .is_some_and(|t| !t.is_expired(now));
        if !live {
            return Ok(None);
        }

        let ids = self
            .items
            .image_ids_for_item(&token, item_id, color, size)
            .await?;

        if ids.is_empty() { Ok(None) } else { Ok(Some(ids)) }
    }
}
