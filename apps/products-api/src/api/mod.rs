//! API routes module

pub mod health;

use axum::Router;
use domain_products::{PgProductRepository, ProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create all API routes backed by PostgreSQL
pub fn routes(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    products(ProductService::new(repository))
}

/// Routes served under `/api`
pub fn products<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new().nest("/products", handlers::router(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::create_router;
    use domain_products::InMemoryProductRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let service = ProductService::new(InMemoryProductRepository::new());
        create_router::<ApiDoc>(products(service), Vec::new())
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_with_max_page_is_not_a_server_error() {
        let request = Request::builder()
            .uri("/api/products?page=18446744073709551615")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["totalCount"], 0);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_carries_correlation_id() {
        let request = Request::builder()
            .uri("/api/products/123456")
            .header("x-request-id", "trace-abc")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-request-id"], "trace-abc");

        let body = json_body(response.into_body()).await;
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "Product with ID 123456 not found.");
        assert_eq!(body["correlationId"], "trace-abc");
    }

    #[tokio::test]
    async fn test_validation_error_gets_generated_correlation_id() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Widget", "stockAvailable": 10, "price": 0 }).to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let header_id = response.headers()["x-request-id"]
            .to_str()
            .unwrap()
            .to_string();

        let body = json_body(response.into_body()).await;
        assert_eq!(body["correlationId"], header_id.as_str());
        assert!(body["details"]["price"].is_array());
    }

    #[tokio::test]
    async fn test_create_location_includes_mount_path() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Widget", "stockAvailable": 10, "price": 9.99 }).to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string();

        let body = json_body(response.into_body()).await;
        let id = body["data"]["productId"].as_str().unwrap();
        assert_eq!(location, format!("/api/products/{}", id));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_wrapped() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/products/123456")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["statusCode"], 405);
        assert!(body["correlationId"].is_string());
    }

    #[tokio::test]
    async fn test_openapi_lists_product_paths() {
        let request = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/products"));
        assert!(paths.contains_key("/api/products/{id}"));
        assert!(paths.contains_key("/api/products/decrement-stock/{id}/{quantity}"));
        assert!(paths.contains_key("/api/products/add-to-stock/{id}/{quantity}"));
    }
}
