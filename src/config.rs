use std::{env, path::PathBuf};

use anyhow::Context;

pub const DEFAULT_MAX_IMAGE_KB: u64 = 2048;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Public root that stored image paths are appended to.
    pub base_url: String,
    /// Directory that holds `uploads/products/`.
    pub upload_root: PathBuf,
    pub max_image_kb: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));
        let upload_root = env::var("UPLOAD_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));
        let max_image_kb = env::var("MAX_IMAGE_KB")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_IMAGE_KB);
        Ok(Self {
            port,
            database_url,
            host,
            base_url,
            upload_root,
            max_image_kb,
        })
    }

    pub fn max_image_bytes(&self) -> usize {
        usize::try_from(self.max_image_kb.saturating_mul(1024)).unwrap_or(usize::MAX)
    }

    /// Largest request body accepted: one full-size image plus room for the text fields.
    pub fn body_limit(&self) -> usize {
        self.max_image_bytes().saturating_add(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_image_kb: u64) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 3000,
            base_url: "http://127.0.0.1:3000".into(),
            upload_root: PathBuf::from("public"),
            max_image_kb,
        }
    }

    #[test]
    fn limits_follow_image_size() {
        let config = config(DEFAULT_MAX_IMAGE_KB);
        assert_eq!(config.max_image_bytes(), 2048 * 1024);
        assert_eq!(config.body_limit(), 3 * 1024 * 1024);
    }

    #[test]
    fn huge_image_limit_saturates() {
        let config = config(u64::MAX);
        assert_eq!(config.max_image_bytes(), usize::MAX);
        assert_eq!(config.body_limit(), usize::MAX);
    }
}
