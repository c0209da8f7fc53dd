//! Product catalog service.

use log::{debug, info, warn};
use mongodb::bson::{doc, Document};
use std::sync::Arc;

use crate::constants::{
    CODE_BAD_REQUEST, CODE_PRODUCT_NOT_FOUND, ERR_EMPTY_PRODUCT_UPDATE, ERR_PRODUCT_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::{
    CreateProductRequest, ListOptions, PageResponse, Product, ProductResponse,
    UpdateProductRequest,
};
use crate::repositories::ProductRepository;
use crate::validators::parse_object_id;

/// Columns a product listing may be sorted by. The first is the default.
pub const PRODUCT_SORT_FIELDS: &[&str] = &["name", "price", "origin", "created_at"];

pub struct ProductService {
    repository: Arc<ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_filtered_products(
        &self,
        options: &ListOptions,
    ) -> Result<PageResponse<ProductResponse>, ApiError> {
        let (products, total) = self.repository.find_page(options).await?;
        let data = products.into_iter().map(ProductResponse::from).collect();
        Ok(PageResponse::new(options, total, data))
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        debug!("Fetching product by ID: {}", id);
        let object_id = parse_object_id(id)?;
        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(product_not_found)
    }

    pub async fn create_product(&self, req: CreateProductRequest) -> Result<Product, ApiError> {
        let now = mongodb::bson::DateTime::now();
        let product = Product {
            id: None,
            name: req.name.trim().to_string(),
            description: req.description,
            price: req.price,
            origin: req.origin.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let id = self.repository.insert(&product).await?;
        info!("Created product {} ({})", id, product.name);

        Ok(Product {
            id: Some(id),
            ..product
        })
    }

    pub async fn update_product(
        &self,
        id: &str,
        req: UpdateProductRequest,
    ) -> Result<Product, ApiError> {
        let object_id = parse_object_id(id)?;
        if req.is_empty() {
            return Err(ApiError::BadRequest {
                code: CODE_BAD_REQUEST.to_string(),
                message: ERR_EMPTY_PRODUCT_UPDATE.to_string(),
            });
        }

        let updated = self
            .repository
            .update(object_id, update_document(req))
            .await?
            .ok_or_else(|| {
                warn!("Update failed: Product not found with id: {}", id);
                product_not_found()
            })?;

        info!("Successfully updated product: {}", id);
        Ok(updated)
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let object_id = parse_object_id(id)?;
        let result = self.repository.delete(object_id).await?;
        if result.deleted_count == 0 {
            warn!("Delete failed: Product not found with id: {}", id);
            return Err(product_not_found());
        }

        info!("Successfully deleted product: {}", id);
        Ok(())
    }
}

fn product_not_found() -> ApiError {
    ApiError::NotFound {
        code: CODE_PRODUCT_NOT_FOUND.to_string(),
        message: ERR_PRODUCT_NOT_FOUND.to_string(),
    }
}

/// `$set` fields for the supplied parts of an update, plus a fresh `updated_at`.
fn update_document(req: UpdateProductRequest) -> Document {
    let mut update = doc! { "updated_at": mongodb::bson::DateTime::now() };
    if let Some(name) = req.name {
        update.insert("name", name.trim());
    }
    if let Some(description) = req.description {
        update.insert("description", description);
    }
    if let Some(price) = req.price {
        update.insert("price", price);
    }
    if let Some(origin) = req.origin {
        update.insert("origin", origin.trim());
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_sets_only_supplied_fields() {
        let req = UpdateProductRequest {
            name: Some(" Robusta ".to_string()),
            description: None,
            price: Some(9.75),
            origin: None,
        };

        let update = update_document(req);
        assert_eq!(update.get_str("name").unwrap(), "Robusta");
        assert_eq!(update.get_f64("price").unwrap(), 9.75);
        assert!(update.get("description").is_none());
        assert!(update.get("origin").is_none());
        assert!(update.get_datetime("updated_at").is_ok());
    }

    #[test]
    fn test_product_not_found_is_404() {
        use actix_web::ResponseError;
        let err = product_not_found();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::NOT_FOUND);
        assert!(err.to_string().ends_with("Product not found"));
    }
}
