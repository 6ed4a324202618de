//! Repository trait for image ownership records.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface mapping image ids to their owning token.
///
/// The bytes themselves live on disk
/// ([`crate::infrastructure::media::FileStore`]); the database only
/// tracks ownership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Records a freshly stored image under its owning token.
    async fn insert(&self, image_id: &str, token: &str) -> Result<(), AppError>;

    /// Returns the owning token of an image id, if the id is known.
    async fn owner(&self, image_id: &str) -> Result<Option<String>, AppError>;

    /// Returns true when every given id is a known image.
    ///
    /// Existence only; ownership is not checked (the original service
    /// accepted any registered id in an item's image list).
    async fn all_exist(&self, image_ids: &[String]) -> Result<bool, AppError>;
}
