//! Configuration for Catalog API

use core_config::{app_info, env_parse_or, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use domain_products::rules::{ProductRules, DEFAULT_FRESH_MIN_SHELF_LIFE_DAYS};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub product_rules: ProductRules,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let fresh_min_shelf_life_days =
            env_parse_or("FRESH_MIN_SHELF_LIFE_DAYS", DEFAULT_FRESH_MIN_SHELF_LIFE_DAYS)?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            product_rules: ProductRules::new(fresh_min_shelf_life_days),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("catalog")),
                ("FRESH_MIN_SHELF_LIFE_DAYS", None),
                ("PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.product_rules.fresh_min_shelf_life_days, 7);
                assert_eq!(config.mongodb.database(), "catalog");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.app.name, "catalog_api");
            },
        );
    }

    #[test]
    fn test_from_env_custom_threshold() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("catalog")),
                ("FRESH_MIN_SHELF_LIFE_DAYS", Some("14")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.product_rules.fresh_min_shelf_life_days, 14);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_threshold() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("catalog")),
                ("FRESH_MIN_SHELF_LIFE_DAYS", Some("a week")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
