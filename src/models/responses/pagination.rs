//! Pagination response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{ListOptions, ProductResponse, UserResponse};

/// One page of a filtered, sorted listing
#[derive(Debug, Serialize, ToSchema)]
#[aliases(UserPage = PageResponse<UserResponse>, ProductPage = PageResponse<ProductResponse>)]
pub struct PageResponse<T: Serialize> {
    /// Current page number (1-based)
    pub page_number: u64,
    /// Items per page
    pub page_size: u64,
    /// Items on this page
    pub count: u64,
    /// Total number of pages for the filter
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub data: Vec<T>,
}

impl<T: Serialize> PageResponse<T> {
    /// Build a page from its items and the total number of matching documents.
    pub fn new(options: &ListOptions, total: u64, data: Vec<T>) -> Self {
        let count = data.len() as u64;
        Self {
            page_number: options.page_number,
            page_size: options.page_size,
            count,
            total_pages: total.div_ceil(options.page_size),
            has_previous_page: options.page_number > 1,
            has_next_page: options.skip().saturating_add(count) < total,
            data,
        }
    }
}
