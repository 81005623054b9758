// Pagination support for list endpoints
// Query parameters plus the paginated response envelope

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// Pagination query parameters extracted from HTTP requests
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// 1-based page number, defaults to 1
    pub page: Option<u32>,
    /// Page size, defaults to 10, capped at 100
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Normalize raw query values into a usable (page, limit) pair
    /// Page 0 and limit 0 are clamped to 1; limit is capped at MAX_LIMIT
    pub fn normalize(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (page, limit)
    }

    /// Row offset for the normalized page
    pub fn offset(&self) -> i64 {
        let (page, limit) = self.normalize();
        i64::from(page - 1) * i64::from(limit)
    }
}

/// Metadata block included with every paginated response
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub total: i64,
    pub current_page: u32,
    pub last_page: u32,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Compute page metadata from a total row count and normalized params
    pub fn new(total: i64, page: u32, limit: u32) -> Self {
        let last_page = if total <= 0 {
            1
        } else {
            ((total + i64::from(limit) - 1) / i64::from(limit)) as u32
        };

        Self {
            total,
            current_page: page,
            last_page,
            limit,
            has_next_page: page < last_page,
            has_previous_page: page > 1,
        }
    }
}

/// Paginated response envelope: data plus page metadata
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: u32, limit: u32) -> Self {
        Self {
            data,
            meta: PageMeta::new(total, page, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_apply_when_params_are_absent() {
        let params = PaginationParams::default();
        assert_eq!(params.normalize(), (1, 10));
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_capped_and_zero_values_are_clamped() {
        let params = PaginationParams {
            page: Some(0),
            limit: Some(500),
        };
        assert_eq!(params.normalize(), (1, 100));

        let params = PaginationParams {
            page: Some(3),
            limit: Some(0),
        };
        assert_eq!(params.normalize(), (3, 1));
    }

    #[test]
    fn offset_skips_previous_pages() {
        let params = PaginationParams {
            page: Some(4),
            limit: Some(25),
        };
        assert_eq!(params.offset(), 75);
    }

    #[test]
    fn meta_for_exact_multiple_of_limit() {
        let meta = PageMeta::new(30, 3, 10);
        assert_eq!(meta.last_page, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn meta_for_partial_last_page() {
        let meta = PageMeta::new(31, 1, 10);
        assert_eq!(meta.last_page, 4);
        assert!(meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn empty_result_set_still_has_one_page() {
        let meta = PageMeta::new(0, 1, 10);
        assert_eq!(meta.last_page, 1);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    proptest! {
        #[test]
        fn prop_last_page_covers_all_rows(
            total in 0i64..1_000_000,
            limit in 1u32..=100,
        ) {
            let meta = PageMeta::new(total, 1, limit);
            // last_page * limit >= total, and one page less never covers
            prop_assert!(i64::from(meta.last_page) * i64::from(limit) >= total);
            if total > 0 {
                prop_assert!(i64::from(meta.last_page - 1) * i64::from(limit) < total);
            }
        }

        #[test]
        fn prop_next_and_previous_flags_are_consistent(
            total in 0i64..100_000,
            page in 1u32..1_000,
            limit in 1u32..=100,
        ) {
            let meta = PageMeta::new(total, page, limit);
            prop_assert_eq!(meta.has_next_page, page < meta.last_page);
            prop_assert_eq!(meta.has_previous_page, page > 1);
        }

        #[test]
        fn prop_offset_matches_page_math(
            page in 1u32..10_000,
            limit in 1u32..=100,
        ) {
            let params = PaginationParams { page: Some(page), limit: Some(limit) };
            prop_assert_eq!(params.offset(), i64::from(page - 1) * i64::from(limit));
        }
    }
}
