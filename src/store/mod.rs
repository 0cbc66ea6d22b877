//! Record store for product rows.
//!
//! Handlers only see the [`ProductStore`] trait; [`SeaOrmProductStore`] is the
//! relational implementation wired up in `main`.

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::models::{Product, ProductRecord};

mod sea;

pub use sea::SeaOrmProductStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new row and return it with its assigned id and timestamps.
    async fn insert(&self, record: ProductRecord) -> Result<Product, DbErr>;

    async fn find(&self, id: i32) -> Result<Option<Product>, DbErr>;

    /// Every row, in id order.
    async fn find_all(&self) -> Result<Vec<Product>, DbErr>;

    /// Overwrite all mutable fields of row `id`.
    async fn update(&self, id: i32, record: ProductRecord) -> Result<Product, DbErr>;

    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;
}
