use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{Catalog, ProductIds};

/// Repository trait for Catalog persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a catalog. A taken id yields `CatalogError::AlreadyExists`.
    async fn create(&self, catalog: Catalog) -> CatalogResult<()>;

    async fn exists(&self, id: i64) -> CatalogResult<bool>;

    async fn list_all(&self) -> CatalogResult<Vec<Catalog>>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Catalog>>;

    /// Catalogs whose product list contains `product_id` as a whole token
    async fn get_by_product_id(&self, product_id: i64) -> CatalogResult<Vec<Catalog>>;

    /// Overwrite title and product list. Returns false when the id is absent.
    async fn update(&self, id: i64, title: String, products: ProductIds) -> CatalogResult<bool>;

    /// Returns false when the id is absent
    async fn delete(&self, id: i64) -> CatalogResult<bool>;
}
