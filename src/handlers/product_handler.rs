//! Product catalog handlers. Reads are public, writes need a bearer token.

use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::require_auth;
use crate::models::{CreateProductRequest, ListQuery, ProductResponse, UpdateProductRequest};
use crate::services::product_service::PRODUCT_SORT_FIELDS;
use crate::services::ProductService;
use crate::validators::validation_errors_to_api_error;

/// List products with search, sort and pagination
///
/// `search` matches the product name case-insensitively. `sort_by` accepts
/// `name` (default), `price`, `origin` or `created_at`.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of products", body = crate::models::ProductPage),
        (status = 400, description = "Invalid sort parameters", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_products(
    product_service: web::Data<ProductService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let options = query.into_inner().into_options(PRODUCT_SORT_FIELDS)?;
    let page = product_service.get_filtered_products(&options).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Malformed ID", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let product = product_service.get_product(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_product(
    product_service: web::Data<ProductService>,
    body: web::Json<CreateProductRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let product = product_service.create_product(body.into_inner()).await?;
    info!("User {} created product {}", claims.sub, product.name);

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// Update some or all fields of a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error or empty update", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    body: web::Json<UpdateProductRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_auth(&req)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let product = product_service
        .update_product(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_auth(&req)?;
    let product_id = path.into_inner();

    product_service.delete_product(&product_id).await?;
    info!("User {} deleted product {}", claims.sub, product_id);

    Ok(HttpResponse::NoContent().finish())
}
