//! Product repository for MongoDB operations on the product catalog.

use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{CODE_INTERNAL_ERROR, COLLECTION_PRODUCTS, ERR_MISSING_INSERTED_ID};
use crate::errors::ApiError;
use crate::models::{ListOptions, Product};
use crate::repositories::{search_filter, sort_document};

/// Repository for product-related database operations.
pub struct ProductRepository {
    collection: Collection<Product>,
}

impl ProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_PRODUCTS),
        }
    }

    /// Create the index backing name search and sort.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for products collection...");
        let index = IndexModel::builder().keys(doc! { "name": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    pub async fn insert(&self, product: &Product) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(product).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError {
                code: CODE_INTERNAL_ERROR.to_string(),
                message: ERR_MISSING_INSERTED_ID.to_string(),
            })
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Product>, ApiError> {
        debug!("Repository: Finding product by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find one page of products whose name matches the search term.
    pub async fn find_page(&self, options: &ListOptions) -> Result<(Vec<Product>, u64), ApiError> {
        let filter = search_filter("name", options.search.as_deref());
        debug!("Repository: Finding products with filter: {:?}", filter);

        let total = self.collection.count_documents(filter.clone()).await?;
        let cursor = self
            .collection
            .find(filter)
            .sort(sort_document(options))
            .skip(options.skip())
            .limit(options.page_size as i64)
            .await?;

        Ok((cursor.try_collect().await?, total))
    }

    /// Apply `$set` fields and return the updated document, if it exists.
    pub async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Product>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: ObjectId) -> Result<mongodb::results::DeleteResult, ApiError> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }
}
