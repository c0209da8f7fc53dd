//! Repository layer for database operations.
//!
//! This module provides a clean separation between business logic (services)
//! and database operations (repositories).

pub mod product_repository;
pub mod user_repository;

pub use product_repository::ProductRepository;
pub use user_repository::UserRepository;

use mongodb::bson::{Bson, Document, Regex};

use crate::models::ListOptions;

/// Case-insensitive substring filter on `field`, or an empty filter.
pub(crate) fn search_filter(field: &str, search: Option<&str>) -> Document {
    let mut filter = Document::new();
    if let Some(term) = search {
        let mut condition = Document::new();
        condition.insert(
            "$regex",
            Bson::RegularExpression(Regex {
                pattern: regex::escape(term),
                options: "i".to_string(),
            }),
        );
        filter.insert(field, condition);
    }
    filter
}

/// Sort document for `options`, with `_id` as a stable tie-breaker.
pub(crate) fn sort_document(options: &ListOptions) -> Document {
    let mut sort = Document::new();
    sort.insert(options.sort_by.as_str(), options.sort_order.direction());
    if options.sort_by != "_id" {
        sort.insert("_id", 1);
    }
    sort
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortOrder;
    use mongodb::bson::doc;

    #[test]
    fn test_search_filter_escapes_regex() {
        let filter = search_filter("email", Some("a+b@x.com"));
        let condition = filter.get_document("email").unwrap();
        let Some(Bson::RegularExpression(regex)) = condition.get("$regex") else {
            panic!("expected a regex condition, got {:?}", condition);
        };
        assert_eq!(regex.pattern, r"a\+b@x\.com");
        assert_eq!(regex.options, "i");

        assert!(search_filter("email", None).is_empty());
    }

    #[test]
    fn test_sort_document() {
        let options = ListOptions {
            page_number: 1,
            page_size: 10,
            search: None,
            sort_by: "price".to_string(),
            sort_order: SortOrder::Desc,
        };
        assert_eq!(sort_document(&options), doc! { "price": -1, "_id": 1 });
    }
}
