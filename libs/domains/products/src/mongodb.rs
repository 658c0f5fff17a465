//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::{is_duplicate_key, with_transient_retry};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{Collation, CollationStrength, FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Collection holding product documents
pub const PRODUCTS_COLLECTION: &str = "Products";

/// Stored shape of a [`Product`]. `ExpiryDate` is a BSON date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ProductDocument {
    id: i64,
    title: String,
    description: String,
    price: String,
    category: String,
    #[serde(rename = "isactive")]
    is_active: bool,
    #[serde(rename = "ExpiryDate", deserialize_with = "deserialize_stored_date")]
    expiry_date: Option<bson::DateTime>,
    voltage: String,
    socket: String,
}

/// Accept a BSON date, an RFC 3339 string, or null
fn deserialize_stored_date<'de, D>(deserializer: D) -> Result<Option<bson::DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::DateTime(date)) => Ok(Some(date)),
        Some(Bson::String(raw)) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|date| Some(bson::DateTime::from_millis(date.timestamp_millis())))
            .map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "ExpiryDate must be a date, found {:?}",
            other.element_type()
        ))),
    }
}

impl From<Product> for ProductDocument {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            is_active: product.is_active,
            expiry_date: product
                .expiry_date
                .map(|date| bson::DateTime::from_millis(date.timestamp_millis())),
            voltage: product.voltage,
            socket: product.socket,
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(document: ProductDocument) -> Self {
        Self {
            id: document.id,
            title: document.title,
            description: document.description,
            price: document.price,
            category: document.category,
            is_active: document.is_active,
            expiry_date: document
                .expiry_date
                .and_then(|date| DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis())),
            voltage: document.voltage,
            socket: document.socket,
        }
    }
}

/// Case-insensitive comparison for category lookups
pub(crate) fn category_collation() -> Collation {
    Collation::builder()
        .locale("en")
        .strength(CollationStrength::Secondary)
        .build()
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<ProductDocument>(PRODUCTS_COLLECTION);
        Self { collection }
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the unique `id` index and the category lookup index
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .collation(category_collation())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    async fn find_many(
        &self,
        filter: Document,
        options: Option<FindOptions>,
    ) -> ProductResult<Vec<Product>> {
        let documents = with_transient_retry(|| {
            let filter = filter.clone();
            let options = options.clone();
            async move {
                self.collection
                    .find(filter)
                    .with_options(options)
                    .await?
                    .try_collect::<Vec<_>>()
                    .await
            }
        })
        .await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }
}

fn id_filter(id: i64) -> Document {
    doc! { "id": id }
}

/// Match documents whose `price` converts to a long no greater than `threshold`.
///
/// String prices are trimmed first; anything that fails conversion becomes
/// null and is excluded, since null sorts below every number.
pub(crate) fn max_price_filter(threshold: i64) -> Document {
    let trimmed = doc! {
        "$cond": [
            { "$eq": [{ "$type": "$price" }, "string"] },
            { "$trim": { "input": "$price" } },
            "$price"
        ]
    };
    let converted = doc! {
        "$convert": {
            "input": trimmed,
            "to": "long",
            "onError": Bson::Null,
            "onNull": Bson::Null,
        }
    };

    doc! {
        "$expr": {
            "$and": [
                { "$ne": [converted.clone(), Bson::Null] },
                { "$lte": [converted, threshold] }
            ]
        }
    }
}

pub(crate) fn ids_from_bson(values: Vec<Bson>) -> Vec<i64> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Bson::Int64(id) => Some(id),
            Bson::Int32(id) => Some(i64::from(id)),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = product.id))]
    async fn create(&self, product: Product) -> ProductResult<()> {
        let id = product.id;
        self.collection
            .insert_one(ProductDocument::from(product))
            .await.map_err(|e| {
            if is_duplicate_key(&e) {
                ProductError::AlreadyExists(id)
            } else {
                ProductError::from(e)
            }
        })?;

        tracing::info!(product_id = id, "Product created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> ProductResult<bool> {
        let count = with_transient_retry(|| async move {
            self.collection.count_documents(id_filter(id)).await
        })
        .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let document =
            with_transient_retry(|| async move { self.collection.find_one(id_filter(id)).await })
                .await?;
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .collation(category_collation())
            .build();
        self.find_many(doc! { "category": category }, Some(options))
            .await
    }

    #[instrument(skip(self))]
    async fn get_by_max_price(&self, threshold: i64) -> ProductResult<Vec<Product>> {
        self.find_many(max_price_filter(threshold), None).await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        self.find_many(doc! {}, None).await
    }

    #[instrument(skip(self, input), fields(product_id = input.id))]
    async fn update(&self, input: UpdateProduct) -> ProductResult<bool> {
        let id = input.id;
        let replacement = ProductDocument::from(Product::replacement(input));

        let result = self
            .collection
            .replace_one(id_filter(id), replacement)
            .await?;

        if result.matched_count > 0 {
            tracing::info!(product_id = id, "Product updated successfully");
        }
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn find_existing_ids(&self, ids: &[i64]) -> ProductResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let filter = doc! { "id": { "$in": ids.to_vec() } };
        let values = with_transient_retry(|| {
            let filter = filter.clone();
            async move { self.collection.distinct("id", filter).await }
        })
        .await?;

        Ok(ids_from_bson(values))
    }
}
