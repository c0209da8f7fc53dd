//! Product request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    #[schema(example = "Arabica Coffee Beans")]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    #[schema(example = "Single-origin, medium roast, 250g")]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    #[schema(example = 12.5)]
    pub price: f64,
    #[validate(length(min = 1, max = 100, message = "Origin must be between 1 and 100 characters"))]
    #[schema(example = "Aceh")]
    pub origin: String,
}

/// Request payload for updating a product. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "Origin must be between 1 and 100 characters"))]
    pub origin: Option<String>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.origin.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let req = CreateProductRequest {
            name: "Tea".to_string(),
            description: "Green".to_string(),
            price: -1.0,
            origin: "Java".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_partial_update_validation() {
        let req: UpdateProductRequest = serde_json::from_str(r#"{"price": 3.5}"#).unwrap();
        assert!(!req.is_empty());
        assert!(req.validate().is_ok());

        let empty: UpdateProductRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let blank: UpdateProductRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(blank.validate().is_err());
    }
}
