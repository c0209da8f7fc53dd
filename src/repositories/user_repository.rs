//! User repository for all MongoDB operations related to users.

use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{CODE_INTERNAL_ERROR, COLLECTION_USERS, ERR_MISSING_INSERTED_ID};
use crate::errors::ApiError;
use crate::models::{ListOptions, User};
use crate::repositories::{search_filter, sort_document};

/// Repository for user-related database operations.
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    /// Create a new UserRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
        }
    }

    /// Create the unique index on `email`.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for users collection...");

        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                mongodb::options::IndexOptions::builder()
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        info!("Database indexes created successfully");
        Ok(())
    }

    /// Insert a new user into the database.
    pub async fn insert(&self, user: &User) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(user).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError {
                code: CODE_INTERNAL_ERROR.to_string(),
                message: ERR_MISSING_INSERTED_ID.to_string(),
            })
    }

    /// Find a user by their ObjectId.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find a user by email address (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await?)
    }

    /// Find one page of users matching the search term.
    pub async fn find_page(&self, options: &ListOptions) -> Result<(Vec<User>, u64), ApiError> {
        let filter = search_filter("email", options.search.as_deref());
        debug!("Repository: Finding users with filter: {:?}", filter);

        let total = self.count(filter.clone()).await?;
        let cursor = self
            .collection
            .find(filter)
            .sort(sort_document(options))
            .skip(options.skip())
            .limit(options.page_size as i64)
            .await?;

        Ok((cursor.try_collect().await?, total))
    }

    /// Count documents matching a filter.
    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Set name and email.
    pub async fn update_profile(
        &self,
        id: ObjectId,
        name: &str,
        email: &str,
    ) -> Result<mongodb::results::UpdateResult, ApiError> {
        Ok(self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "name": name,
                        "email": email,
                        "updated_at": mongodb::bson::DateTime::now()
                    }
                },
            )
            .await?)
    }

    /// Delete a user by ObjectId.
    pub async fn delete(&self, id: ObjectId) -> Result<mongodb::results::DeleteResult, ApiError> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }

    /// Update user password.
    pub async fn update_password(
        &self,
        id: ObjectId,
        password_hash: &str,
    ) -> Result<mongodb::results::UpdateResult, ApiError> {
        Ok(self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "password_hash": password_hash,
                        "updated_at": mongodb::bson::DateTime::now()
                    }
                },
            )
            .await?)
    }
}
