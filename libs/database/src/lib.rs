//! Database library providing the MongoDB store client and retry utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health check and error classification
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All database features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let products = client.database(config.database()).collection::<Document>("Products");
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_if, retry_with_backoff};
