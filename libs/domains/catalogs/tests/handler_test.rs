//! Handler tests for the Catalogs domain
//!
//! Catalog and product storage are both in memory, so the existence filter
//! on create runs against real product data.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_catalogs::*;
use domain_products::{InMemoryProductRepository, Product};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // For oneshot()

fn product(id: i64) -> Product {
    Product {
        id,
        title: format!("Product {}", id),
        price: "1".into(),
        ..Default::default()
    }
}

fn catalog(id: i64, title: &str, products: &str) -> Catalog {
    Catalog {
        id,
        title: title.to_string(),
        products: products.parse().unwrap(),
    }
}

fn app_with(catalogs: Vec<Catalog>, product_ids: &[i64]) -> Router {
    let products = InMemoryProductRepository::with_products(
        product_ids.iter().copied().map(product).collect(),
    );
    let service = CatalogService::new(InMemoryCatalogRepository::with_catalogs(catalogs), products);
    handlers::router(service)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_create_keeps_only_existing_unique_products() {
    let app = app_with(vec![], &[1, 2, 3]);

    let (status, body) = get(&app, "/CreateNewCatalog?id=1&title=Summer&products=1,2,2,9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = get(&app, "/GetCatalogByProductId?ProductId=2").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/GetCatalogByProductId?ProductId=9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_without_matches_stores_empty_list() {
    let app = app_with(vec![], &[1, 2, 3]);

    let (status, _) = get(&app, "/CreateNewCatalog?id=1&title=Empty&products=9,9").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/GetCatalogById?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "id : 1 title : Empty");

    let (status, _) = get(&app, "/GetCatalogByProductId?productId=9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_duplicate_id_is_400() {
    let app = app_with(vec![catalog(1, "Summer", "")], &[]);

    let (status, body) = get(&app, "/CreateNewCatalog?id=1&title=Again&products=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["message"], "Catalog with id: 1 already exists");
}

#[tokio::test]
async fn test_create_non_numeric_product_id_is_400() {
    let app = app_with(vec![], &[1]);

    let (status, _) = get(&app, "/CreateNewCatalog?id=1&title=Bad&products=1,x").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_all_catalogs_text_and_alias() {
    let app = app_with(
        vec![catalog(1, "Summer", "1"), catalog(2, "Winter", "2")],
        &[],
    );

    let (status, body) = get(&app, "/GetAllCalalogs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "id : 1\n title : Summer\nid : 2\n title : Winter\n");

    let (status, alias_body) = get(&app, "/GetAllCatalogs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alias_body, body);
}

#[tokio::test]
async fn test_get_all_catalogs_empty_is_404() {
    let app = app_with(vec![], &[]);

    let (status, body) = get(&app, "/GetAllCalalogs").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No catalogs been found"));
}

#[tokio::test]
async fn test_get_by_product_id_matches_whole_tokens() {
    let app = app_with(
        vec![catalog(1, "Ones", "1,11"), catalog(2, "Twelves", "12,112")],
        &[],
    );

    let (status, body) = get(&app, "/GetCatalogByProductId?ProductId=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "id : 1\n title : Ones\n");

    let (status, _) = get(&app, "/GetCatalogByProductId?ProductId=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_dedups_without_existence_filter() {
    let app = app_with(vec![catalog(1, "Summer", "1")], &[1]);

    let (status, _) = get(&app, "/UpdateCatalog?id=1&title=Autumn&productIds=7,7,8").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/GetCatalogById?id=1").await;
    assert_eq!(body, "id : 1 title : Autumn");

    let (status, _) = get(&app, "/GetCatalogByProductId?ProductId=7").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_catalog_is_404() {
    let app = app_with(vec![], &[]);

    let (status, _) = get(&app, "/UpdateCatalog?id=5&title=Ghost&productIds=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/GetCatalogById?id=5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = app_with(vec![catalog(1, "Summer", "")], &[]);

    let (first, _) = get(&app, "/DeleteCatalog?id=1").await;
    let (lookup, _) = get(&app, "/GetCatalogById?id=1").await;
    let (second, body) = get(&app, "/DeleteCatalog?id=1").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(lookup, StatusCode::NOT_FOUND);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert!(body.contains("No catalog been found for deletion"));
}

#[tokio::test]
async fn test_non_numeric_query_value_is_json_400() {
    let app = app_with(vec![catalog(1, "Summer", "")], &[]);

    for uri in [
        "/GetCatalogById?id=abc",
        "/GetCatalogByProductId?ProductId=x",
        "/DeleteCatalog?id=",
    ] {
        let (status, body) = get(&app, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "INVALID_QUERY");
        assert_eq!(json["code"], 1003);
    }
}
