//! Image uploads and retrieval: id allocation, storage, validity checks.

use chrono::Utc;
use rand::Rng;
use serde_json::json;
use std::sync::Arc;

use crate::domain::repositories::{ImageRepository, TokenRepository};
use crate::error::AppError;
use crate::infrastructure::media::FileStore;

/// Length of generated image ids.
const IMAGE_ID_LENGTH: usize = 12;

/// Image id alphabet: ASCII letters only, matching the original id
/// format (case-sensitive, no digits).
const IMAGE_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Service handling image bytes and their ownership records.
///
/// All decode and filesystem work runs on the blocking thread pool;
/// an 8 MiB decode must not stall the async workers.
pub struct ImageService {
    images: Arc<dyn ImageRepository>,
    tokens: Arc<dyn TokenRepository>,
    store: Arc<FileStore>,
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(
        images: Arc<dyn ImageRepository>,
        tokens: Arc<dyn TokenRepository>,
        store: Arc<FileStore>,
    ) -> Self {
        Self {
            images,
            tokens,
            store,
        }
    }

    /// Stores an upload under a fresh image id and records its owner.
    ///
    /// When the ownership record cannot be written, the files are
    /// removed again so failures leave nothing on disk.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the bytes are not a
    /// decodable image, [`AppError::Internal`] on storage failures.
    pub async fn store_upload(&self, token: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let mut image_id = random_image_id();
        while self.images.owner(&image_id).await?.is_some() {
            image_id = random_image_id();
        }

        let store = self.store.clone();
        let id = image_id.clone();
        run_blocking(move || store.save(&id, &bytes)).await?;

        if let Err(e) = self.images.insert(&image_id, token).await {
            let store = self.store.clone();
            let id = image_id.clone();
            let _ = run_blocking(move || {
                store.remove(&id);
                Ok(())
            })
            .await;
            return Err(e);
        }

        Ok(image_id)
    }

    /// Fetches the full-size image if its owning token is still live.
    pub async fn open_image(&self, image_id: &str) -> Result<Option<Vec<u8>>, AppError> {
        if !self.is_visible(image_id).await? {
            return Ok(None);
        }
        let store = self.store.clone();
        let id = image_id.to_string();
        run_blocking(move || store.read_image(&id)).await
    }

    /// Fetches the preview thumbnail if its owning token is still live.
    pub async fn open_preview(&self, image_id: &str) -> Result<Option<Vec<u8>>, AppError> {
        if !self.is_visible(image_id).await? {
            return Ok(None);
        }
        let store = self.store.clone();
        let id = image_id.to_string();
        run_blocking(move || store.read_preview(&id)).await
    }

    /// Removes the files behind a batch of deleted image records.
    pub async fn remove_files(&self, image_ids: Vec<String>) {
        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || {
            for id in &image_ids {
                store.remove(id);
            }
        })
        .await;

        if let Err(e) = result {
            tracing::error!("image cleanup task panicked: {e}");
        }
    }

    /// An image is served only while its owning token exists and has not
    /// expired.
    async fn is_visible(&self, image_id: &str) -> Result<bool, AppError> {
        let Some(token) = self.images.owner(image_id).await? else {
            return Ok(false);
        };

        let now = Utc::now().timestamp();
        Ok(self
            .tokens
            .find(&token)
            .await?
            .is_some_and(|t| !t.is_expired(now)))
    }
}

/// Runs file-store work on the blocking pool.
async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        tracing::error!("storage task panicked: {e}");
        AppError::internal("Storage task failed", json!({}))
    })?
}

/// Generates a random image id from the letters-only alphabet.
fn random_image_id() -> String {
    let mut rng = rand::rng();
    (0..IMAGE_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..IMAGE_ID_ALPHABET.len());
            IMAGE_ID_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShopToken;
    use crate::domain::repositories::{MockImageRepository, MockTokenRepository};
    use crate::test_util::temp_store;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn sample_jpeg() -> Vec<u8> {
        let img = RgbImage::from_pixel(32, 32, image::Rgb([10, 20, 30]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Jpeg)
            .unwrap();
        bytes.into_inner()
    }

    fn live_token(token: &str) -> ShopToken {
        ShopToken {
            token: token.to_string(),
            shop_id: "42".to_string(),
            description: String::new(),
            expires_at: Utc::now().timestamp() + 3600,
            created_at: Utc::now(),
        }
    }

    fn stored_file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_store_upload_allocates_and_records_id() {
        let (store, _dir) = temp_store();

        let mut images = MockImageRepository::new();
        images.expect_owner().returning(|_| Ok(None));
        images
            .expect_insert()
            .withf(|id, token| id.len() == IMAGE_ID_LENGTH && token == "tok")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ImageService::new(
            Arc::new(images),
            Arc::new(MockTokenRepository::new()),
            store.clone(),
        );
        let id = service.store_upload("tok", sample_jpeg()).await.unwrap();

        assert!(id.chars().all(|c| c.is_ascii_alphabetic()));
        assert!(store.read_image(&id).unwrap().is_some());
        assert!(store.read_preview(&id).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_upload_rejects_garbage_without_recording() {
        let (store, _dir) = temp_store();

        let mut images = MockImageRepository::new();
        images.expect_owner().returning(|_| Ok(None));
        images.expect_insert().times(0);

        let service = ImageService::new(
            Arc::new(images),
            Arc::new(MockTokenRepository::new()),
            store,
        );
        let err = service
            .store_upload("tok", b"nope".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_store_upload_removes_files_when_record_fails() {
        let (store, dir) = temp_store();

        let mut images = MockImageRepository::new();
        images.expect_owner().returning(|_| Ok(None));
        images
            .expect_insert()
            .returning(|_, _| Err(AppError::internal("db down", json!({}))));

        let service = ImageService::new(
            Arc::new(images),
            Arc::new(MockTokenRepository::new()),
            store,
        );
        let err = service.store_upload("tok", sample_jpeg()).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        // The saved image and preview were rolled back.
        assert_eq!(stored_file_count(&dir.root.join("images")), 0);
        assert_eq!(stored_file_count(&dir.root.join("previews")), 0);
    }

    #[tokio::test]
    async fn test_remove_files_deletes_both_files() {
        let (store, _dir) = temp_store();
        store.save("abcDEF", &sample_jpeg()).unwrap();
        store.save("ghiJKL", &sample_jpeg()).unwrap();

        let service = ImageService::new(
            Arc::new(MockImageRepository::new()),
            Arc::new(MockTokenRepository::new()),
            store.clone(),
        );
        service
            .remove_files(vec!["abcDEF".to_string(), "ghiJKL".to_string()])
            .await;

        assert!(store.read_image("abcDEF").unwrap().is_none());
        assert!(store.read_preview("abcDEF").unwrap().is_none());
        assert!(store.read_image("ghiJKL").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_image_for_expired_token_is_none() {
        let (store, _dir) = temp_store();
        store.save("abcDEF", &sample_jpeg()).unwrap();

        let mut images = MockImageRepository::new();
        images
            .expect_owner()
            .returning(|_| Ok(Some("tok".to_string())));
        let mut tokens = MockTokenRepository::new();
        tokens.expect_find().returning(|_| {
            let mut t = live_token("tok");
            t.expires_at = 60;
            Ok(Some(t))
        });

        let service = ImageService::new(Arc::new(images), Arc::new(tokens), store);
        assert!(service.open_image("abcDEF").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_preview_for_live_token() {
        let (store, _dir) = temp_store();
        store.save("abcDEF", &sample_jpeg()).unwrap();

        let mut images = MockImageRepository::new();
        images
            .expect_owner()
            .returning(|_| Ok(Some("tok".to_string())));
        let mut tokens = MockTokenRepository::new();
        tokens.expect_find().returning(|_| Ok(Some(live_token("tok"))));

        let service = ImageService::new(Arc::new(images), Arc::new(tokens), store);
        assert!(service.open_preview("abcDEF").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_open_image_unknown_id_is_none() {
        let (store, _dir) = temp_store();

        let mut images = MockImageRepository::new();
        images.expect_owner().returning(|_| Ok(None));

        let service = ImageService::new(
            Arc::new(images),
            Arc::new(MockTokenRepository::new()),
            store,
        );
        assert!(service.open_image("nobody").await.unwrap().is_none());
    }

    #[test]
    fn test_random_image_id_shape() {
        let id = random_image_id();
        assert_eq!(id.len(), IMAGE_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphabetic()));
    }
}
