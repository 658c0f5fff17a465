//! In-process ProductRepository, used by handler tests and local tooling.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{parse_price, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Products kept in insertion order behind an async lock
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<()> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(ProductError::AlreadyExists(product.id));
        }
        products.push(product);
        Ok(())
    }

    async fn exists(&self, id: i64) -> ProductResult<bool> {
        Ok(self.products.read().await.iter().any(|p| p.id == id))
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect())
    }

    async fn get_by_max_price(&self, threshold: i64) -> ProductResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| parse_price(&p.price).is_some_and(|price| price <= threshold))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.snapshot().await)
    }

    async fn update(&self, input: UpdateProduct) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == input.id) {
            Some(existing) => {
                *existing = Product::replacement(input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }

    async fn find_existing_ids(&self, ids: &[i64]) -> ProductResult<Vec<i64>> {
        let products = self.products.read().await;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| products.iter().any(|p| p.id == *id))
            .collect())
    }
}
