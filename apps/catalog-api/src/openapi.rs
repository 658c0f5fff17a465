//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Products and catalogs over MongoDB. All endpoints are GET with query-string parameters."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/Product", api = domain_products::ApiDoc),
        (path = "/api/Catalog", api = domain_catalogs::ApiDoc)
    ),
    tags(
        (name = "Product", description = "Product endpoints"),
        (name = "Catalog", description = "Catalog endpoints")
    )
)]
pub struct ApiDoc;
