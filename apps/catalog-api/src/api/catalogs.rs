//! Catalog routes

use axum::Router;
use domain_catalogs::{handlers, CatalogService, MongoCatalogRepository};
use domain_products::MongoProductRepository;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = CatalogService::new(
        MongoCatalogRepository::new(&state.db),
        MongoProductRepository::new(&state.db),
    );
    handlers::router(service)
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoCatalogRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
