//! Products Domain
//!
//! Products stored in the MongoDB `Products` collection, addressed by a
//! caller-assigned integer id.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GET endpoints, query-string input, text/JSON output
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Price check, id uniqueness, category rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product document, query DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoProductRepository, ProductRules, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository).with_rules(ProductRules::new(7));
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod render;
pub mod repository;
pub mod rules;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{CreateProduct, Product, ProductCategory, UpdateProduct};
pub use mongodb::MongoProductRepository;
pub use render::{render_list, render_one, Summary};
pub use repository::ProductRepository;
#[cfg(any(test, feature = "mock"))]
pub use repository::MockProductRepository;
pub use rules::ProductRules;
pub use service::ProductService;
