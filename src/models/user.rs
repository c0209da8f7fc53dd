use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: mongodb::bson::DateTime,
    pub updated_at: mongodb::bson::DateTime,
}

impl User {
    /// Hex form of the document id, empty for a user not yet inserted.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

#[cfg(test)]
impl User {
    /// Build a persisted-looking user with a cheap bcrypt hash.
    pub fn for_test(name: &str, email: &str, password: &str) -> Self {
        let now = mongodb::bson::DateTime::now();
        Self {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }
}
