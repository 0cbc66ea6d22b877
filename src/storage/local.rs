//! # Local Filesystem Image Store

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{
    ImageStore, PRODUCT_IMAGE_DIR, StorageError, StorageResult, ValidImage, generate_file_name,
};

/// Stores images below `root`, e.g. `<root>/uploads/products/<name>`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn exists(&self, path: &str) -> StorageResult<bool> {
        let full_path = self.full_path(path)?;
        Ok(fs::try_exists(&full_path).await?)
    }

    fn full_path(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path);
        let is_plain = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, image: &ValidImage) -> StorageResult<String> {
        let relative = format!("{PRODUCT_IMAGE_DIR}/{}", generate_file_name(image.kind));
        let full_path = self.full_path(&relative)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full_path, &image.bytes).await?;

        tracing::debug!(path = %relative, bytes = image.bytes.len(), "image stored");
        Ok(relative)
    }

    async fn delete(&self, path: &str) -> StorageResult<bool> {
        let full_path = self.full_path(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ImageKind;
    use axum::body::Bytes;
    use tempfile::TempDir;

    fn png() -> ValidImage {
        ValidImage {
            kind: ImageKind::Png,
            bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\nrest"),
        }
    }

    #[tokio::test]
    async fn save_writes_under_products_dir() {
        let temp = TempDir::new().unwrap();
        let store = LocalImageStore::new(temp.path());

        let path = store.save(&png()).await.unwrap();
        assert!(path.starts_with("uploads/products/"));
        assert!(path.ends_with(".png"));

        let written = std::fs::read(temp.path().join(&path)).unwrap();
        assert_eq!(written, b"\x89PNG\r\n\x1a\nrest");
    }

    #[tokio::test]
    async fn delete_reports_missing_files() {
        let temp = TempDir::new().unwrap();
        let store = LocalImageStore::new(temp.path());

        let path = store.save(&png()).await.unwrap();
        assert!(store.delete(&path).await.unwrap());
        assert!(!store.exists(&path).await.unwrap());
        assert!(!store.delete(&path).await.unwrap());
    }

    #[tokio::test]
    async fn rejects_paths_escaping_root() {
        let temp = TempDir::new().unwrap();
        let store = LocalImageStore::new(temp.path());

        assert!(matches!(
            store.delete("../outside.png").await,
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            store.delete("/etc/passwd").await,
            Err(StorageError::InvalidPath(_))
        ));
    }
}
