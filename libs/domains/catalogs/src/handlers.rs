//! HTTP handlers for the Catalog endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use axum_helpers::{
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    JsonQuery,
};
use domain_products::{render_list, render_one, ProductRepository};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{Catalog, CatalogIdQuery, CreateCatalog, ProductIdQuery, UpdateCatalog};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the Catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        create_new_catalog,
        get_all_catalogs,
        get_catalog_by_id,
        get_catalog_by_product_id,
        update_catalog,
        delete_catalog,
    ),
    components(
        schemas(Catalog),
        responses(NotFoundResponse, BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Catalog", description = "Catalog endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<C, P> = Arc<CatalogService<C, P>>;

/// Create the catalogs router
pub fn router<C, P>(service: CatalogService<C, P>) -> Router
where
    C: CatalogRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/CreateNewCatalog", get(create_new_catalog))
        // Historical spelling, kept for existing clients
        .route("/GetAllCalalogs", get(get_all_catalogs))
        .route("/GetAllCatalogs", get(get_all_catalogs))
        .route("/GetCatalogById", get(get_catalog_by_id))
        .route("/GetCatalogByProductId", get(get_catalog_by_product_id))
        .route("/UpdateCatalog", get(update_catalog))
        .route("/DeleteCatalog", get(delete_catalog))
        .with_state(shared_service)
}

/// Create a catalog
///
/// Duplicate product ids are dropped, as are ids with no matching product.
#[utoipa::path(
    get,
    path = "/CreateNewCatalog",
    tag = "Catalog",
    params(CreateCatalog),
    responses(
        (status = 200, description = "Catalog created"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_new_catalog<C: CatalogRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    JsonQuery(input): JsonQuery<CreateCatalog>,
) -> CatalogResult<StatusCode> {
    service.create_catalog(input).await?;
    Ok(StatusCode::OK)
}

/// List every catalog
#[utoipa::path(
    get,
    path = "/GetAllCalalogs",
    tag = "Catalog",
    responses(
        (status = 200, description = "One `id`/`title` pair per catalog", body = String, content_type = "text/plain"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all_catalogs<C: CatalogRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
) -> CatalogResult<String> {
    tracing::info!("Getting all catalogs");
    let catalogs = service.list_catalogs().await?;
    Ok(render_list(&catalogs))
}

/// Get a catalog by id
#[utoipa::path(
    get,
    path = "/GetCatalogById",
    tag = "Catalog",
    params(CatalogIdQuery),
    responses(
        (status = 200, description = "`id : <id> title : <title>`", body = String, content_type = "text/plain"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_catalog_by_id<C: CatalogRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    JsonQuery(query): JsonQuery<CatalogIdQuery>,
) -> CatalogResult<String> {
    tracing::info!("Getting catalog by id: {}", query.id);
    let catalog = service.get_catalog(query.id).await?;
    Ok(render_one(&catalog))
}

/// Catalogs that reference a product
#[utoipa::path(
    get,
    path = "/GetCatalogByProductId",
    tag = "Catalog",
    params(ProductIdQuery),
    responses(
        (status = 200, description = "One `id`/`title` pair per catalog", body = String, content_type = "text/plain"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_catalog_by_product_id<C: CatalogRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    JsonQuery(query): JsonQuery<ProductIdQuery>,
) -> CatalogResult<String> {
    tracing::info!("Getting catalog by product id: {}", query.product_id);
    let catalogs = service.get_by_product_id(query.product_id).await?;
    Ok(render_list(&catalogs))
}

/// Overwrite a catalog
#[utoipa::path(
    get,
    path = "/UpdateCatalog",
    tag = "Catalog",
    params(UpdateCatalog),
    responses(
        (status = 200, description = "Catalog updated"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_catalog<C: CatalogRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    JsonQuery(input): JsonQuery<UpdateCatalog>,
) -> CatalogResult<StatusCode> {
    tracing::info!("Updating catalog with id: {}", input.id);
    service.update_catalog(input).await?;
    Ok(StatusCode::OK)
}

/// Delete a catalog
#[utoipa::path(
    get,
    path = "/DeleteCatalog",
    tag = "Catalog",
    params(CatalogIdQuery),
    responses(
        (status = 200, description = "Catalog deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_catalog<C: CatalogRepository, P: ProductRepository>(
    State(service): State<SharedService<C, P>>,
    JsonQuery(query): JsonQuery<CatalogIdQuery>,
) -> CatalogResult<StatusCode> {
    tracing::info!("Deleting catalog with id: {}", query.id);
    service.delete_catalog(query.id).await?;
    Ok(StatusCode::OK)
}
