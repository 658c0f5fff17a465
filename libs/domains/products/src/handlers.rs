//! HTTP handlers for the Product endpoints.
//!
//! Every route is a GET taking query-string parameters. Lookups answer with
//! plain text, `GetAllProducts` with JSON, and writes with an empty 200.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    JsonQuery, ValidatedQuery,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CategoryQuery, CreateProduct, PriceQuery, Product, ProductCategory, ProductIdQuery,
    UpdateProduct,
};
use crate::render::{render_list, render_one};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        get_product_by_id,
        get_product_by_category,
        get_product_by_price,
        get_all_products,
        create_new_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductCategory),
        responses(NotFoundResponse, BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Product", description = "Product endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/GetProductById", get(get_product_by_id))
        .route("/GetProductByCategory", get(get_product_by_category))
        .route("/GetProductByPrice", get(get_product_by_price))
        .route("/GetAllProducts", get(get_all_products))
        .route("/CreateNewProduct", get(create_new_product))
        .route("/UpdateProduct", get(update_product))
        .route("/DeleteProduct", get(delete_product))
        .with_state(shared_service)
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/GetProductById",
    tag = "Product",
    params(ProductIdQuery),
    responses(
        (status = 200, description = "`id : <id> title : <title>`", body = String, content_type = "text/plain"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_by_id<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonQuery(query): JsonQuery<ProductIdQuery>,
) -> ProductResult<String> {
    tracing::info!("Getting product by id: {}", query.id);
    let product = service.get_product(query.id).await?;
    Ok(render_one(&product))
}

/// Get products by category
#[utoipa::path(
    get,
    path = "/GetProductByCategory",
    tag = "Product",
    params(CategoryQuery),
    responses(
        (status = 200, description = "One `id`/`title` pair per product", body = String, content_type = "text/plain"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonQuery(query): JsonQuery<CategoryQuery>,
) -> ProductResult<String> {
    tracing::info!("Getting product by category: {}", query.category);
    let products = service.get_by_category(&query.category).await?;
    Ok(render_list(&products))
}

/// Get products priced at or below a threshold
#[utoipa::path(
    get,
    path = "/GetProductByPrice",
    tag = "Product",
    params(PriceQuery),
    responses(
        (status = 200, description = "One `id`/`title` pair per product", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_by_price<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonQuery(query): JsonQuery<PriceQuery>,
) -> ProductResult<String> {
    tracing::info!("Getting product by price: {}", query.price);
    let products = service.get_by_price(&query.price).await?;
    Ok(render_list(&products))
}

/// List every product
#[utoipa::path(
    get,
    path = "/GetAllProducts",
    tag = "Product",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    tracing::info!("Getting all products");
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    get,
    path = "/CreateNewProduct",
    tag = "Product",
    params(CreateProduct),
    responses(
        (status = 200, description = "Product created"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_new_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(input): ValidatedQuery<CreateProduct>,
) -> ProductResult<StatusCode> {
    service.create_product(input).await?;
    Ok(StatusCode::OK)
}

/// Overwrite a product
#[utoipa::path(
    get,
    path = "/UpdateProduct",
    tag = "Product",
    params(UpdateProduct),
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(input): ValidatedQuery<UpdateProduct>,
) -> ProductResult<StatusCode> {
    tracing::info!("Updating product id: {}", input.id);
    service.update_product(input).await?;
    Ok(StatusCode::OK)
}

/// Delete a product
#[utoipa::path(
    get,
    path = "/DeleteProduct",
    tag = "Product",
    params(ProductIdQuery),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonQuery(query): JsonQuery<ProductIdQuery>,
) -> ProductResult<StatusCode> {
    tracing::info!("Deleting product id: {}", query.id);
    service.delete_product(query.id).await?;
    Ok(StatusCode::OK)
}
