// ABOUTME: Pagination utilities for list endpoints
// ABOUTME: skip/limit query parameters and the paginated response wrapper

use serde::{Deserialize, Serialize};

/// Default page size for list queries
pub const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size to prevent performance issues
pub const MAX_LIMIT: i64 = 1000;

/// Query parameters for pagination
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    /// Number of records to skip (defaults to 0)
    #[serde(default)]
    pub skip: i64,

    /// Maximum number of records to return (defaults to DEFAULT_LIMIT, max MAX_LIMIT)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl PageParams {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    /// Validate and normalize pagination parameters
    /// Returns (limit, offset) suitable for SQL queries
    pub fn validate(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_LIMIT), self.skip.max(0))
    }

    pub fn limit(&self) -> i64 {
        self.validate().0
    }

    pub fn offset(&self) -> i64 {
        self.validate().1
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

/// Metadata about pagination state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageMeta {
    pub skip: i64,
    pub limit: i64,
    pub total: i64,
    pub has_more: bool,
}

impl PageMeta {
    pub fn new(params: &PageParams, returned: usize, total: i64) -> Self {
        let (limit, skip) = params.validate();
        Self {
            skip,
            limit,
            total,
            has_more: skip + (returned as i64) < total,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, params: &PageParams, total: i64) -> Self {
        let pagination = PageMeta::new(params, items.len(), total);
        Self { items, pagination }
    }

    /// Convert the page items while keeping the pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = PageParams::default();
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_params_are_clamped() {
        let params = PageParams::new(-5, 0);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 1);

        let params = PageParams::new(10, 5000);
        assert_eq!(params.offset(), 10);
        assert_eq!(params.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_page_meta_has_more() {
        let params = PageParams::new(0, 20);
        let meta = PageMeta::new(&params, 20, 45);
        assert!(meta.has_more);

        let params = PageParams::new(40, 20);
        let meta = PageMeta::new(&params, 5, 45);
        assert!(!meta.has_more);
        assert_eq!(meta.total, 45);
    }

    #[test]
    fn test_paginated_response_map() {
        let params = PageParams::new(0, 2);
        let response = PaginatedResponse::new(vec![1, 2], &params, 3).map(|n| n * 10);

        assert_eq!(response.items, vec![10, 20]);
        assert!(response.pagination.has_more);
    }
}
