//! Product response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

/// Product data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProductResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[schema(example = "Arabica Coffee Beans")]
    pub name: String,
    pub description: String,
    #[schema(example = 12.5)]
    pub price: f64,
    #[schema(example = "Aceh")]
    pub origin: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: product.name,
            description: product.description,
            price: product.price,
            origin: product.origin,
            created_at: DateTime::from_timestamp_millis(product.created_at.timestamp_millis())
                .unwrap_or_default(),
            updated_at: DateTime::from_timestamp_millis(product.updated_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}
