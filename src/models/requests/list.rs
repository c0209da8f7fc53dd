//! Query parameters shared by list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::constants::{
    CODE_INVALID_SORT, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, ERR_INVALID_SORT_ORDER,
    MAX_PAGE_NUMBER, MAX_PAGE_SIZE,
};
use crate::errors::ApiError;

/// Query parameters for search, sort and pagination
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number (default: 1)
    pub page_number: Option<u64>,
    /// Items per page (default: 10, max: 100)
    pub page_size: Option<u64>,
    /// Case-insensitive substring search
    pub search: Option<String>,
    /// Field to sort by
    pub sort_by: Option<String>,
    /// 'asc' (default) or 'desc'
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// MongoDB sort direction.
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// A [`ListQuery`] with defaults applied and sort parameters checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    pub page_number: u64,
    pub page_size: u64,
    pub search: Option<String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl ListOptions {
    /// Documents to skip before the requested page.
    pub fn skip(&self) -> u64 {
        self.page_number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }
}

impl ListQuery {
    /// Apply defaults and reject sort fields outside `sortable`.
    ///
    /// The first entry of `sortable` is the default sort field.
    pub fn into_options(self, sortable: &[&str]) -> Result<ListOptions, ApiError> {
        let page_number = self
            .page_number
            .unwrap_or(DEFAULT_PAGE_NUMBER)
            .clamp(1, MAX_PAGE_NUMBER);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => sortable.first().copied().unwrap_or("_id").to_string(),
            Some(field) if sortable.contains(&field) => field.to_string(),
            Some(field) => {
                return Err(ApiError::BadRequest {
                    code: CODE_INVALID_SORT.to_string(),
                    message: format!(
                        "Cannot sort by '{}'. Allowed fields: {}",
                        field,
                        sortable.join(", ")
                    ),
                })
            }
        };

        let sort_order = match self.sort_order.as_deref().map(|o| o.trim().to_lowercase()) {
            None => SortOrder::Asc,
            Some(order) if order.is_empty() || order == "asc" => SortOrder::Asc,
            Some(order) if order == "desc" => SortOrder::Desc,
            Some(_) => {
                return Err(ApiError::BadRequest {
                    code: CODE_INVALID_SORT.to_string(),
                    message: ERR_INVALID_SORT_ORDER.to_string(),
                })
            }
        };

        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(ListOptions {
            page_number,
            page_size,
            search,
            sort_by,
            sort_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTABLE: &[&str] = &["email", "name"];

    #[test]
    fn test_defaults() {
        let options = ListQuery::default().into_options(SORTABLE).unwrap();
        assert_eq!(options.page_number, 1);
        assert_eq!(options.page_size, 10);
        assert_eq!(options.sort_by, "email");
        assert_eq!(options.sort_order, SortOrder::Asc);
        assert_eq!(options.search, None);
        assert_eq!(options.skip(), 0);
    }

    #[test]
    fn test_page_bounds_are_clamped() {
        let options = ListQuery {
            page_number: Some(0),
            page_size: Some(1_000),
            ..Default::default()
        }
        .into_options(SORTABLE)
        .unwrap();
        assert_eq!(options.page_number, 1);
        assert_eq!(options.page_size, 100);

        let options = ListQuery {
            page_number: Some(3),
            page_size: Some(0),
            ..Default::default()
        }
        .into_options(SORTABLE)
        .unwrap();
        assert_eq!(options.page_size, 1);
        assert_eq!(options.skip(), 2);
    }

    #[test]
    fn test_huge_page_number_is_capped() {
        let options = ListQuery {
            page_number: Some(u64::MAX),
            page_size: Some(u64::MAX),
            ..Default::default()
        }
        .into_options(SORTABLE)
        .unwrap();
        assert_eq!(options.page_number, MAX_PAGE_NUMBER);
        assert!(options.skip() <= i64::MAX as u64);
    }

    #[test]
    fn test_sort_parameters() {
        let options = ListQuery {
            sort_by: Some("name".to_string()),
            sort_order: Some("DESC".to_string()),
            search: Some("  ".to_string()),
            ..Default::default()
        }
        .into_options(SORTABLE)
        .unwrap();
        assert_eq!(options.sort_by, "name");
        assert_eq!(options.sort_order.direction(), -1);
        assert_eq!(options.search, None);
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let err = ListQuery {
            sort_by: Some("password_hash".to_string()),
            ..Default::default()
        }
        .into_options(SORTABLE)
        .unwrap_err();
        assert!(err.to_string().contains("Allowed fields: email, name"));
    }

    #[test]
    fn test_unknown_sort_order_rejected() {
        let result = ListQuery {
            sort_order: Some("sideways".to_string()),
            ..Default::default()
        }
        .into_options(SORTABLE);
        assert!(result.is_err());
    }
}
