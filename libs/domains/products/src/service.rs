//! Product Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{parse_price, CreateProduct, Product, ProductCategory, UpdateProduct};
use crate::repository::ProductRepository;
use crate::rules::ProductRules;

/// Product service providing business logic operations
///
/// Validation happens here, before any write reaches the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    rules: ProductRules,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with default rules
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            rules: ProductRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ProductRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> ProductRules {
        self.rules
    }

    /// Create a product.
    ///
    /// Checks, in order: numeric price, unused id, known category, category rule.
    #[instrument(skip(self, input), fields(product_id = input.id))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<()> {
        input.validate().inspect_err(|e| tracing::info!("Rejected product: {}", e))?;

        if self.repository.exists(input.id).await? {
            let err = ProductError::AlreadyExists(input.id);
            tracing::info!("{}", err);
            return Err(err);
        }

        let category = input
            .category
            .parse::<ProductCategory>()
            .map_err(|_| ProductError::validation("Not valid category"))?;

        self.rules
            .check(category, &input, Utc::now())
            .inspect_err(|e| tracing::info!("{}", e))?;

        tracing::info!(product_id = input.id, "Creating new product");
        self.repository.create(Product::new(input, category)).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::not_found("No product been found"))
    }

    /// Products in a category, ignoring case
    #[instrument(skip(self))]
    pub async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let category = ProductCategory::normalize(category);
        let products = self.repository.get_by_category(&category).await?;
        non_empty(products)
    }

    /// Products priced at or below `price`
    #[instrument(skip(self))]
    pub async fn get_by_price(&self, price: &str) -> ProductResult<Vec<Product>> {
        let threshold =
            parse_price(price).ok_or_else(|| ProductError::validation("price is invalid"))?;
        let products = self.repository.get_by_max_price(threshold).await?;
        non_empty(products)
    }

    /// Every product. Never fails with NotFound.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list_all().await
    }

    /// Overwrite a product. Only the price format is checked.
    #[instrument(skip(self, input), fields(product_id = input.id))]
    pub async fn update_product(&self, input: UpdateProduct) -> ProductResult<()> {
        input.validate()?;

        let id = input.id;
        if self.repository.update(input).await? {
            tracing::info!(product_id = id, "Product updated");
            Ok(())
        } else {
            Err(ProductError::not_found("No product been found for update"))
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            tracing::info!(product_id = id, "Product deleted");
            Ok(())
        } else {
            Err(ProductError::not_found("No product been found for deletion"))
        }
    }
}

fn non_empty(products: Vec<Product>) -> ProductResult<Vec<Product>> {
    if products.is_empty() {
        Err(ProductError::not_found("No products been found"))
    } else {
        Ok(products)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            rules: self.rules,
        }
    }
}
