//! Page query and page result

use crate::response::{ListResponse, Pagination};
use serde::{Deserialize, Serialize};

/// Rows per page for every HR list view.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// The tuple driving a list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based)
    pub page: u32,
    /// Rows per page
    pub limit: u32,
    /// Committed search term, empty for none
    #[serde(default)]
    pub search: String,
}

impl PageQuery {
    /// Create a query, clamping `page` to at least 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
            search: String::new(),
        }
    }

    pub fn first(limit: u32) -> Self {
        Self::new(1, limit)
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Query-string parameters for a list endpoint.
    ///
    /// Searchable endpoints always receive `search`, even when empty.
    pub fn to_params(&self, searchable: bool) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if searchable {
            params.push(("search", self.search.clone()));
        }
        params
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<R> {
    pub records: Vec<R>,
    /// Count across all pages
    pub total_count: u64,
}

impl<R> PageResult<R> {
    pub fn new(records: Vec<R>, total_count: u64) -> Self {
        Self {
            records,
            total_count,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn pagination(&self, query: &PageQuery) -> Pagination {
        Pagination::new(query.page, query.limit, self.total_count)
    }
}

impl<R> Default for PageResult<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<ListResponse<R>> for PageResult<R> {
    fn from(resp: ListResponse<R>) -> Self {
        Self::new(resp.data, resp.total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_clamped() {
        assert_eq!(PageQuery::new(0, 5).page, 1);
        assert_eq!(PageQuery::default().with_page(0).page, 1);
        assert_eq!(PageQuery::default().limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_params() {
        let q = PageQuery::new(2, 5).with_search("ann");
        assert_eq!(
            q.to_params(true),
            vec![
                ("page", "2".to_string()),
                ("limit", "5".to_string()),
                ("search", "ann".to_string())
            ]
        );
        assert_eq!(q.to_params(false).len(), 2);
        assert_eq!(PageQuery::new(1, 5).to_params(true)[2].1, "");
    }

    #[test]
    fn test_pagination_from_result() {
        let result = PageResult::new(vec![1, 2, 3, 4, 5], 12);
        let p = result.pagination(&PageQuery::new(3, 5));
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_next());
    }
}
