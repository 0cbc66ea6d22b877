use std::sync::Arc;

use crate::{config::AppConfig, storage::ImageStore, store::ProductStore};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub images: Arc<dyn ImageStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductStore>,
        images: Arc<dyn ImageStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            products,
            images,
            config: Arc::new(config),
        }
    }

    /// Absolute URL for a stored relative path; the bare base URL when there is none.
    pub fn image_url(&self, path: Option<&str>) -> String {
        public_url(&self.config.base_url, path.unwrap_or_default())
    }
}

pub fn public_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::public_url;

    #[test]
    fn joins_base_and_path() {
        assert_eq!(
            public_url("http://localhost:3000/", "uploads/products/a.png"),
            "http://localhost:3000/uploads/products/a.png"
        );
        assert_eq!(
            public_url("https://shop.example", "/uploads/products/a.png"),
            "https://shop.example/uploads/products/a.png"
        );
        assert_eq!(public_url("http://localhost:3000", ""), "http://localhost:3000/");
    }
}
