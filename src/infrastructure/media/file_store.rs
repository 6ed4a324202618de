//! On-disk storage for uploaded images and their preview thumbnails.

use image::ImageFormat;
use serde_json::json;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Stores full-size uploads and generated previews as `{image_id}.jpg`
/// files under two directories.
///
/// Uploads are decoded before anything is written; bytes that are not a
/// readable image are rejected, which is also what makes the preview
/// possible. Previews are downscaled to fit a square of
/// `preview_max_dim` pixels, preserving aspect ratio.
pub struct FileStore {
    images_dir: PathBuf,
    previews_dir: PathBuf,
    preview_max_dim: u32,
}

impl FileStore {
    /// Creates a store rooted at the two directories. The directories
    /// themselves are created by [`ensure_dirs`](Self::ensure_dirs).
    pub fn new(
        images_dir: impl Into<PathBuf>,
        previews_dir: impl Into<PathBuf>,
        preview_max_dim: u32,
    ) -> Self {
        Self {
            images_dir: images_dir.into(),
            previews_dir: previews_dir.into(),
            preview_max_dim,
        }
    }

    /// Creates both storage directories if missing.
    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.images_dir)?;
        fs::create_dir_all(&self.previews_dir)?;
        Ok(())
    }

    fn image_path(&self, image_id: &str) -> PathBuf {
        self.images_dir.join(format!("{image_id}.jpg"))
    }

    fn preview_path(&self, image_id: &str) -> PathBuf {
        self.previews_dir.join(format!("{image_id}.jpg"))
    }

    /// Writes the uploaded bytes and a downscaled preview.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the bytes do not decode as
    /// an image, [`AppError::Internal`] on filesystem errors.
    pub fn save(&self, image_id: &str, bytes: &[u8]) -> Result<(), AppError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| {
            AppError::bad_request("Upload is not a decodable image", json!({ "reason": e.to_string() }))
        })?;

        fs::write(self.image_path(image_id), bytes)?;

        let preview = decoded
            .thumbnail(self.preview_max_dim, self.preview_max_dim)
            .to_rgb8();
        preview
            .save_with_format(self.preview_path(image_id), ImageFormat::Jpeg)
            .map_err(|e| {
                tracing::error!("failed to write preview for {image_id}: {e}");
                AppError::internal("Failed to write preview", json!({}))
            })?;

        Ok(())
    }

    /// Reads the full-size image, `None` when no such file exists.
    pub fn read_image(&self, image_id: &str) -> Result<Option<Vec<u8>>, AppError> {
        read_optional(&self.image_path(image_id))
    }

    /// Reads the preview thumbnail, `None` when no such file exists.
    pub fn read_preview(&self, image_id: &str) -> Result<Option<Vec<u8>>, AppError> {
        read_optional(&self.preview_path(image_id))
    }

    /// Removes both files of an image. Missing files are not an error;
    /// token deletion must succeed even after manual cleanup.
    pub fn remove(&self, image_id: &str) {
        for path in [self.image_path(image_id), self.preview_path(image_id)] {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("failed to remove {}: {e}", path.display());
                }
            }
        }
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, AppError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::temp_store;
    use image::RgbImage;
    use std::io::Cursor;

    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Jpeg)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_save_writes_image_and_preview() {
        let (store, _dir) = temp_store();

        let bytes = sample_jpeg(200, 100);
        store.save("abcdef", &bytes).unwrap();

        assert_eq!(store.read_image("abcdef").unwrap().unwrap(), bytes);

        let preview = store.read_preview("abcdef").unwrap().unwrap();
        let decoded = image::load_from_memory(&preview).unwrap();
        assert!(decoded.width() <= 64 && decoded.height() <= 64);
    }

    #[test]
    fn test_save_rejects_garbage() {
        let (store, _dir) = temp_store();

        let err = store.save("abcdef", b"not an image").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        // Nothing half-written.
        assert!(store.read_image("abcdef").unwrap().is_none());
    }

    #[test]
    fn test_read_missing_is_none() {
        let (store, _dir) = temp_store();
        assert!(store.read_image("missing").unwrap().is_none());
        assert!(store.read_preview("missing").unwrap().is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (store, _dir) = temp_store();

        store.save("abcdef", &sample_jpeg(32, 32)).unwrap();
        store.remove("abcdef");
        assert!(store.read_image("abcdef").unwrap().is_none());
        assert!(store.read_preview("abcdef").unwrap().is_none());

        // Second removal of the same id is fine.
        store.remove("abcdef");
    }
}
