//! HTTP handlers for Products API

use axum::{
    Router,
    extract::{OriginalUri, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use axum_helpers::{
    ApiPagedResponse, ApiResponse, PathParams, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{BaseProductDto, Product, ProductPatchDto, ProductQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const LIST_MESSAGE: &str = "Products retrieved successfully.";
pub const GET_MESSAGE: &str = "Product retrieved successfully.";
pub const CREATE_MESSAGE: &str = "Product created successfully.";
pub const UPDATE_MESSAGE: &str = "Product updated successfully.";
pub const PATCH_MESSAGE: &str = "Product patched successfully.";
pub const DELETE_MESSAGE: &str = "Product deleted successfully.";
pub const DECREMENT_MESSAGE: &str = "Stock decremented successfully.";
pub const ADD_MESSAGE: &str = "Stock added successfully.";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        patch_product,
        delete_product,
        decrement_stock,
        add_to_stock,
    ),
    components(
        schemas(Product, BaseProductDto, ProductPatchDto, ProductQuery),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .route("/decrement-stock/{id}/{quantity}", put(decrement_stock))
        .route("/add-to-stock/{id}/{quantity}", put(add_to_stock))
        .with_state(shared_service)
}

/// List products one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "One page of products", body = ApiPagedResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> ProductResult<ApiPagedResponse<Product>> {
    let page = service.list_products(query).await?;
    let total_count = page.total_count;

    Ok(ApiPagedResponse::new(
        LIST_MESSAGE,
        page.items,
        page.page,
        page.page_size,
        total_count,
    ))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = BaseProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(input): ValidatedJson<BaseProductDto>,
) -> ProductResult<Response> {
    let product = service.create_product(input).await?;
    let location = format!(
        "{}/{}",
        uri.path().trim_end_matches('/'),
        product.product_id
    );

    let mut response = ApiResponse::created(CREATE_MESSAGE, product).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Six digit product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams(id): PathParams<String>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.get_product(&id).await?;
    Ok(ApiResponse::ok(GET_MESSAGE, product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Six digit product ID")
    ),
    request_body = BaseProductDto,
    responses(
        (status = 200, description = "Product replaced", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams(id): PathParams<String>,
    ValidatedJson(input): ValidatedJson<BaseProductDto>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.update_product(&id, input).await?;
    Ok(ApiResponse::ok(UPDATE_MESSAGE, product))
}

/// Change selected fields of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Six digit product ID")
    ),
    request_body = ProductPatchDto,
    responses(
        (status = 200, description = "Product patched", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams(id): PathParams<String>,
    ValidatedJson(input): ValidatedJson<ProductPatchDto>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.patch_product(&id, input).await?;
    Ok(ApiResponse::ok(PATCH_MESSAGE, product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Six digit product ID")
    ),
    responses(
        (status = 200, description = "Product deleted",
            example = json!({"statusCode": 200, "message": "Product deleted successfully.", "data": null})),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams(id): PathParams<String>,
) -> ProductResult<ApiResponse<()>> {
    service.delete_product(&id).await?;
    Ok(ApiResponse::message(DELETE_MESSAGE))
}

/// Remove units from stock; nothing changes when stock is short
#[utoipa::path(
    put,
    path = "/decrement-stock/{id}/{quantity}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Six digit product ID"),
        ("quantity" = i32, Path, description = "Units to remove, at least 1")
    ),
    responses(
        (status = 200, description = "Stock decremented",
            example = json!({"statusCode": 200, "message": "Stock decremented successfully.", "data": null})),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn decrement_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams((id, quantity)): PathParams<(String, i32)>,
) -> ProductResult<ApiResponse<()>> {
    service.decrement_stock(&id, quantity).await?;
    Ok(ApiResponse::message(DECREMENT_MESSAGE))
}

/// Add units to stock
#[utoipa::path(
    put,
    path = "/add-to-stock/{id}/{quantity}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Six digit product ID"),
        ("quantity" = i32, Path, description = "Units to add, at least 1")
    ),
    responses(
        (status = 200, description = "Stock added",
            example = json!({"statusCode": 200, "message": "Stock added successfully.", "data": null})),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_to_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    PathParams((id, quantity)): PathParams<(String, i32)>,
) -> ProductResult<ApiResponse<()>> {
    service.add_to_stock(&id, quantity).await?;
    Ok(ApiResponse::message(ADD_MESSAGE))
}
