//! # Image Storage
//!
//! Product images live in a flat directory under [`PRODUCT_IMAGE_DIR`], named
//! by [`generate_file_name`] and never by the client's file name.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

pub mod image;
pub mod local;

pub use image::{ImageKind, ImageRejection, UploadedImage, ValidImage};
pub use local::LocalImageStore;

/// Relative directory recorded in `products.product_image`.
pub const PRODUCT_IMAGE_DIR: &str = "uploads/products";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

#[async_trait]
pub trait ImageStore: Send + Sync + std::fmt::Debug {
    /// Write the image under a freshly generated name and return its relative path.
    async fn save(&self, image: &ValidImage) -> StorageResult<String>;

    /// Remove the file at `path`. Returns `false` when it was already gone.
    async fn delete(&self, path: &str) -> StorageResult<bool>;
}

/// `<unix-seconds>_<uuid>.<ext>`
pub fn generate_file_name(kind: ImageKind) -> String {
    format!(
        "{}_{}.{}",
        Utc::now().timestamp(),
        Uuid::new_v4().simple(),
        kind.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_unique_and_typed() {
        let a = generate_file_name(ImageKind::Png);
        let b = generate_file_name(ImageKind::Png);
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert!(generate_file_name(ImageKind::Jpeg).ends_with(".jpg"));
    }
}
