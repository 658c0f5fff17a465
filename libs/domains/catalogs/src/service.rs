//! Catalog Service - Business logic layer

use domain_products::ProductRepository;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Catalog, CreateCatalog, ProductIds, UpdateCatalog};
use crate::repository::CatalogRepository;

/// Catalog operations. Product references are checked against `P` on create.
pub struct CatalogService<C: CatalogRepository, P: ProductRepository> {
    catalogs: Arc<C>,
    products: Arc<P>,
}

impl<C: CatalogRepository, P: ProductRepository> CatalogService<C, P> {
    pub fn new(catalogs: C, products: P) -> Self {
        Self {
            catalogs: Arc::new(catalogs),
            products: Arc::new(products),
        }
    }

    /// Create a catalog.
    ///
    /// The product list is de-duplicated and then narrowed to products that
    /// exist, so the stored list may be empty.
    #[instrument(skip(self, input), fields(catalog_id = input.id))]
    pub async fn create_catalog(&self, input: CreateCatalog) -> CatalogResult<()> {
        if self.catalogs.exists(input.id).await? {
            let err = CatalogError::AlreadyExists(input.id);
            tracing::info!("{}", err);
            return Err(err);
        }

        let requested: ProductIds = input.products.parse()?;
        let products = if requested.is_empty() {
            requested
        } else {
            let existing = self.products.find_existing_ids(requested.as_slice()).await?;
            requested.retain_existing(&existing)
        };

        tracing::info!(catalog_id = input.id, "Creating new catalog");
        self.catalogs
            .create(Catalog {
                id: input.id,
                title: input.title,
                products,
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_catalogs(&self) -> CatalogResult<Vec<Catalog>> {
        let catalogs = self.catalogs.list_all().await?;
        non_empty(catalogs)
    }

    #[instrument(skip(self))]
    pub async fn get_catalog(&self, id: i64) -> CatalogResult<Catalog> {
        self.catalogs
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("No catalog been found"))
    }

    #[instrument(skip(self))]
    pub async fn get_by_product_id(&self, product_id: i64) -> CatalogResult<Vec<Catalog>> {
        let catalogs = self.catalogs.get_by_product_id(product_id).await?;
        non_empty(catalogs)
    }

    /// Overwrite title and product list.
    ///
    /// Unlike create, product ids are only de-duplicated, not checked for existence.
    #[instrument(skip(self, input), fields(catalog_id = input.id))]
    pub async fn update_catalog(&self, input: UpdateCatalog) -> CatalogResult<()> {
        let products: ProductIds = input.product_ids.parse()?;

        if self.catalogs.update(input.id, input.title, products).await? {
            tracing::info!(catalog_id = input.id, "Catalog updated");
            Ok(())
        } else {
            Err(CatalogError::not_found("No catalog been found for update"))
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_catalog(&self, id: i64) -> CatalogResult<()> {
        if self.catalogs.delete(id).await? {
            tracing::info!(catalog_id = id, "Catalog deleted");
            Ok(())
        } else {
            Err(CatalogError::not_found("No catalog been found for deletion"))
        }
    }
}

fn non_empty(catalogs: Vec<Catalog>) -> CatalogResult<Vec<Catalog>> {
    if catalogs.is_empty() {
        Err(CatalogError::not_found("No catalogs been found"))
    } else {
        Ok(catalogs)
    }
}

impl<C: CatalogRepository, P: ProductRepository> Clone for CatalogService<C, P> {
    fn clone(&self) -> Self {
        Self {
            catalogs: Arc::clone(&self.catalogs),
            products: Arc::clone(&self.products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogRepository;
    use domain_products::{MockProductRepository, ProductError};
    use mockall::predicate::*;

    fn create_input(products: &str) -> CreateCatalog {
        CreateCatalog {
            id: 1,
            title: "Summer".into(),
            products: products.into(),
        }
    }

    fn products_existing(ids: &'static [i64]) -> MockProductRepository {
        let mut mock = MockProductRepository::new();
        mock.expect_find_existing_ids()
            .returning(move |requested| {
                Ok(requested.iter().copied().filter(|id| ids.contains(id)).collect())
            });
        mock
    }

    #[tokio::test]
    async fn test_create_filters_duplicates_and_unknown_products() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_exists().with(eq(1)).returning(|_| Ok(false));
        catalogs
            .expect_create()
            .withf(|c| c.products.to_string() == "1,2")
            .times(1)
            .returning(|_| Ok(()));

        let service = CatalogService::new(catalogs, products_existing(&[1, 2, 3]));
        assert!(service.create_catalog(create_input("1,2,2,9")).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_no_matches_stores_empty() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_exists().returning(|_| Ok(false));
        catalogs
            .expect_create()
            .withf(|c| c.products.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let service = CatalogService::new(catalogs, products_existing(&[1, 2, 3]));
        assert!(service.create_catalog(create_input("9,9")).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_empty_input_skips_product_lookup() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_exists().returning(|_| Ok(false));
        catalogs
            .expect_create()
            .withf(|c| c.products.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let mut products = MockProductRepository::new();
        products.expect_find_existing_ids().never();

        let service = CatalogService::new(catalogs, products);
        assert!(service.create_catalog(create_input("")).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_exists().returning(|_| Ok(true));
        catalogs.expect_create().never();

        let service = CatalogService::new(catalogs, MockProductRepository::new());
        let result = service.create_catalog(create_input("1")).await;

        assert!(matches!(result, Err(CatalogError::AlreadyExists(1))));
    }

    #[tokio::test]
    async fn test_create_rejects_non_integer_token() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_exists().returning(|_| Ok(false));
        catalogs.expect_create().never();

        let service = CatalogService::new(catalogs, MockProductRepository::new());
        let result = service.create_catalog(create_input("1,two")).await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_propagates_product_lookup_failure() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_exists().returning(|_| Ok(false));
        catalogs.expect_create().never();

        let mut products = MockProductRepository::new();
        products
            .expect_find_existing_ids()
            .returning(|_| Err(ProductError::Database("unreachable".into())));

        let service = CatalogService::new(catalogs, products);
        let result = service.create_catalog(create_input("1")).await;

        assert!(matches!(result, Err(CatalogError::Product(ProductError::Database(_)))));
    }

    #[tokio::test]
    async fn test_update_only_dedups() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs
            .expect_update()
            .withf(|id, title, products| {
                *id == 1 && title == "Winter" && products.to_string() == "9,4"
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let mut products = MockProductRepository::new();
        products.expect_find_existing_ids().never();

        let service = CatalogService::new(catalogs, products);
        let input = UpdateCatalog {
            id: 1,
            title: "Winter".into(),
            product_ids: "9,4,9".into(),
        };

        assert!(service.update_catalog(input).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_catalog() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_update().returning(|_, _, _| Ok(false));

        let service = CatalogService::new(catalogs, MockProductRepository::new());
        let result = service
            .update_catalog(UpdateCatalog {
                id: 5,
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(msg)) if msg == "No catalog been found for update"));
    }

    #[tokio::test]
    async fn test_list_empty_is_not_found() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_list_all().returning(|| Ok(vec![]));

        let service = CatalogService::new(catalogs, MockProductRepository::new());
        let result = service.list_catalogs().await;

        assert!(matches!(result, Err(CatalogError::NotFound(msg)) if msg == "No catalogs been found"));
    }

    #[tokio::test]
    async fn test_get_by_product_id_empty_is_not_found() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs
            .expect_get_by_product_id()
            .with(eq(7))
            .returning(|_| Ok(vec![]));

        let service = CatalogService::new(catalogs, MockProductRepository::new());
        assert!(matches!(
            service.get_by_product_id(7).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_catalog() {
        let mut catalogs = MockCatalogRepository::new();
        catalogs.expect_delete().with(eq(3)).returning(|_| Ok(false));

        let service = CatalogService::new(catalogs, MockProductRepository::new());
        let result = service.delete_catalog(3).await;

        assert!(matches!(result, Err(CatalogError::NotFound(msg)) if msg.ends_with("for deletion")));
    }
}
