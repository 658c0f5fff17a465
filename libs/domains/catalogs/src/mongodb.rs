//! MongoDB implementation of CatalogRepository

use async_trait::async_trait;
use database::mongodb::{is_duplicate_key, with_transient_retry};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Catalog, ProductIds};
use crate::repository::CatalogRepository;

/// Collection holding catalog documents
pub const CATALOGS_COLLECTION: &str = "Catalogs";

pub struct MongoCatalogRepository {
    collection: Collection<Catalog>,
}

impl MongoCatalogRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Catalog>(CATALOGS_COLLECTION);
        Self { collection }
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Catalog>(collection_name);
        Self { collection }
    }

    /// Create the unique `id` index
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Catalog indexes created successfully");
        Ok(())
    }

    async fn find_many(&self, filter: Document) -> CatalogResult<Vec<Catalog>> {
        let catalogs = with_transient_retry(|| {
            let filter = filter.clone();
            async move {
                self.collection
                    .find(filter)
                    .await?
                    .try_collect::<Vec<_>>()
                    .await
            }
        })
        .await?;
        Ok(catalogs)
    }
}

fn id_filter(id: i64) -> Document {
    doc! { "id": id }
}

/// Match `product_id` as a whole comma-separated token of `products`.
///
/// Tokens are compared the way `ProductIds::parse_lenient` reads them:
/// surrounding whitespace, a sign and leading zeros are allowed.
pub(crate) fn product_membership_filter(product_id: i64) -> Document {
    doc! { "products": { "$regex": membership_pattern(product_id) } }
}

fn membership_pattern(product_id: i64) -> String {
    let number = match product_id {
        0 => "[+-]?0+".to_string(),
        id if id > 0 => format!("\\+?0*{}", id),
        id => format!("-0*{}", id.unsigned_abs()),
    };
    format!("(^|,)\\s*{}\\s*(,|$)", number)
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self, catalog), fields(catalog_id = catalog.id))]
    async fn create(&self, catalog: Catalog) -> CatalogResult<()> {
        let id = catalog.id;
        self.collection.insert_one(&catalog).await.map_err(|e| {
            if is_duplicate_key(&e) {
                CatalogError::AlreadyExists(id)
            } else {
                CatalogError::from(e)
            }
        })?;

        tracing::info!(catalog_id = id, products = %catalog.products, "Catalog created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> CatalogResult<bool> {
        let count = with_transient_retry(|| async move {
            self.collection.count_documents(id_filter(id)).await
        })
        .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> CatalogResult<Vec<Catalog>> {
        self.find_many(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Catalog>> {
        let catalog =
            with_transient_retry(|| async move { self.collection.find_one(id_filter(id)).await })
                .await?;
        Ok(catalog)
    }

    #[instrument(skip(self))]
    async fn get_by_product_id(&self, product_id: i64) -> CatalogResult<Vec<Catalog>> {
        self.find_many(product_membership_filter(product_id)).await
    }

    #[instrument(skip(self, title, products))]
    async fn update(&self, id: i64, title: String, products: ProductIds) -> CatalogResult<bool> {
        let update = doc! {
            "$set": {
                "title": title,
                "products": products.to_string(),
            }
        };

        let result = self.collection.update_one(id_filter(id), update).await?;

        if result.matched_count > 0 {
            tracing::info!(catalog_id = id, "Catalog updated successfully");
        }
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(catalog_id = id, "Catalog deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}
