use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Products are addressed by their caller-assigned integer `id`.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product. A taken id yields `ProductError::AlreadyExists`.
    async fn create(&self, product: Product) -> ProductResult<()>;

    /// Check whether a product with this id exists
    async fn exists(&self, id: i64) -> ProductResult<bool>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Products whose stored category equals `category`, ignoring case
    async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// Products whose price, read as an integer, is at most `threshold`.
    /// Non-numeric prices never match.
    async fn get_by_max_price(&self, threshold: i64) -> ProductResult<Vec<Product>>;

    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    /// Overwrite every mutable field. Returns false when the id is absent.
    async fn update(&self, input: UpdateProduct) -> ProductResult<bool>;

    /// Returns false when the id is absent
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// The subset of `ids` that belong to stored products, in no particular order
    async fn find_existing_ids(&self, ids: &[i64]) -> ProductResult<Vec<i64>>;
}
