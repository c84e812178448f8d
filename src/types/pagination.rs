//! Offset/limit pagination for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters.
///
/// Raw values are kept as strings so malformed input falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of users to skip (default 0)
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
    /// Page size (default 10, max 100)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

impl PaginationParams {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: Some(offset.to_string()),
            limit: Some(limit.to_string()),
        }
    }

    /// Offset clamped to zero
    pub fn offset(&self) -> u64 {
        parse(&self.offset).map_or(0, |v| v.max(0) as u64)
    }

    /// Limit defaulted when absent or non-positive and capped at the maximum
    pub fn limit(&self) -> u64 {
        match parse(&self.limit) {
            Some(v) if v > 0 => (v as u64).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: u64,
    pub offset: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, offset: u64, limit: u64) -> Self {
        let (page, pages) = if limit > 0 {
            (offset / limit + 1, total.div_ceil(limit))
        } else {
            (1, 0)
        };

        Self {
            total,
            offset,
            page,
            limit,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(offset: Option<&str>, limit: Option<&str>) -> PaginationParams {
        PaginationParams {
            offset: offset.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults() {
        let p = PaginationParams::default();
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(params(None, Some("500")).limit(), 100);
        assert_eq!(params(None, Some("100")).limit(), 100);
        assert_eq!(params(None, Some("25")).limit(), 25);
    }

    #[test]
    fn test_non_positive_or_garbage_limit_uses_default() {
        assert_eq!(params(None, Some("0")).limit(), 10);
        assert_eq!(params(None, Some("-3")).limit(), 10);
        assert_eq!(params(None, Some("ten")).limit(), 10);
    }

    #[test]
    fn test_negative_offset_is_clamped() {
        assert_eq!(params(Some("-20"), None).offset(), 0);
        assert_eq!(params(Some("abc"), None).offset(), 0);
        assert_eq!(PaginationParams::new(30, 10).offset(), 30);
    }

    #[test]
    fn test_meta() {
        let meta = PaginationMeta::new(25, 20, 10);
        assert_eq!(meta.pages, 3);
        assert_eq!(meta.page, 3);

        assert_eq!(PaginationMeta::new(0, 0, 10).pages, 0);
        assert_eq!(PaginationMeta::new(10, 0, 10).pages, 1);
        assert_eq!(PaginationMeta::new(10, 0, 0).pages, 0);
    }
}
