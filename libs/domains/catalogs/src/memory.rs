//! In-process CatalogRepository, used by handler tests and local tooling.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Catalog, ProductIds};
use crate::repository::CatalogRepository;

#[derive(Default)]
pub struct InMemoryCatalogRepository {
    catalogs: RwLock<Vec<Catalog>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalogs(catalogs: Vec<Catalog>) -> Self {
        Self {
            catalogs: RwLock::new(catalogs),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn create(&self, catalog: Catalog) -> CatalogResult<()> {
        let mut catalogs = self.catalogs.write().await;
        if catalogs.iter().any(|c| c.id == catalog.id) {
            return Err(CatalogError::AlreadyExists(catalog.id));
        }
        catalogs.push(catalog);
        Ok(())
    }

    async fn exists(&self, id: i64) -> CatalogResult<bool> {
        Ok(self.catalogs.read().await.iter().any(|c| c.id == id))
    }

    async fn list_all(&self) -> CatalogResult<Vec<Catalog>> {
        Ok(self.catalogs.read().await.clone())
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Catalog>> {
        Ok(self.catalogs.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn get_by_product_id(&self, product_id: i64) -> CatalogResult<Vec<Catalog>> {
        Ok(self
            .catalogs
            .read()
            .await
            .iter()
            .filter(|c| c.products.contains(product_id))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, title: String, products: ProductIds) -> CatalogResult<bool> {
        let mut catalogs = self.catalogs.write().await;
        match catalogs.iter_mut().find(|c| c.id == id) {
            Some(catalog) => {
                catalog.title = title;
                catalog.products = products;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let mut catalogs = self.catalogs.write().await;
        let before = catalogs.len();
        catalogs.retain(|c| c.id != id);
        Ok(catalogs.len() < before)
    }
}
