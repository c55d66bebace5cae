//! Pagination parameters and paged results.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Pagination parameters embedded by value in request shapes.
///
/// Flattened into the enclosing JSON object, so `{"page": 2, "limit": 20}`
/// sits next to the request's own fields. Missing fields fall back to the
/// defaults (page 1, limit 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Maximum rows per page.
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Returns a copy with `page >= 1` and `1 <= limit <= MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Number of rows to skip for this page.
    pub fn offset(&self) -> u64 {
        let page = self.normalized();
        u64::from(page.page - 1) * u64::from(page.limit)
    }
}

/// One page of results plus the total row count across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataGrid<T> {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub rows: Vec<T>,
}

impl<T> DataGrid<T> {
    pub fn new(request: PageRequest, total: u64, rows: Vec<T>) -> Self {
        let request = request.normalized();
        Self {
            page: request.page,
            limit: request.limit,
            total,
            rows,
        }
    }

    /// Convert every row, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> DataGrid<U> {
        DataGrid {
            page: self.page,
            limit: self.limit,
            total: self.total,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_normalized_clamps_out_of_range_values() {
        let page = PageRequest::new(0, 0).normalized();
        assert_eq!(page, PageRequest::new(1, 1));

        let page = PageRequest::new(2, 10_000).normalized();
        assert_eq!(page.limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let page: PageRequest = serde_json::from_str(r#"{"page": 4}"#).unwrap();
        assert_eq!(page, PageRequest::new(4, DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn test_grid_map_keeps_metadata() {
        let grid = DataGrid::new(PageRequest::new(2, 5), 7, vec![1, 2]);
        let mapped = grid.map(|n| n * 10);
        assert_eq!(mapped.page, 2);
        assert_eq!(mapped.limit, 5);
        assert_eq!(mapped.total, 7);
        assert_eq!(mapped.rows, vec![10, 20]);
    }
}
