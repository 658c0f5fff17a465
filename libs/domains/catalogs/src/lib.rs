//! Catalogs Domain
//!
//! Named groupings of products, stored in the MongoDB `Catalogs` collection.
//! A catalog references products through a comma-joined id list; on the
//! Rust side that list is a [`ProductIds`] value.
//!
//! Creating a catalog consults the products domain so that only existing
//! products are referenced. Updates only de-duplicate.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalogs::{handlers, CatalogService, MongoCatalogRepository};
//! use domain_products::MongoProductRepository;
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let service = CatalogService::new(
//!     MongoCatalogRepository::new(&db),
//!     MongoProductRepository::new(&db),
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryCatalogRepository;
pub use models::{Catalog, CreateCatalog, InvalidProductId, ProductIds, UpdateCatalog};
pub use mongodb::MongoCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
