//! Paging parameters and the pagination block of list responses.

use serde::{Deserialize, Serialize};

use crate::auth::UserRecord;
use crate::error::{DomainError, DomainResult};

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Which page of a list to fetch. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if `page` or `limit` is zero.
    pub fn new(page: u32, limit: u32) -> DomainResult<Self> {
        if page == 0 {
            return Err(DomainError::InvalidInput("page starts at 1".to_string()));
        }
        if limit == 0 {
            return Err(DomainError::InvalidInput(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { page, limit })
    }

    /// The requested page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// `page` and `limit` as query parameters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Pagination block returned next to every list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page, starting at 1.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A user search: free-text query plus paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearch {
    query: String,
    page: PageRequest,
}

impl UserSearch {
    /// Creates a search for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if the query is blank.
    pub fn new(query: impl Into<String>, page: PageRequest) -> DomainResult<Self> {
        Ok(Self {
            query: super::required("search query", query)?,
            page,
        })
    }

    /// The trimmed query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// `q`, `page` and `limit` as query parameters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.query.clone())];
        pairs.extend(self.page.query_pairs());
        pairs
    }
}

/// One page of user search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    /// Matching users.
    pub users: Vec<UserRecord>,
    /// Paging state.
    pub pagination: Pagination,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_page_is_first_twenty() {
        let page = PageRequest::default();
        assert_eq!(
            page.query_pairs(),
            vec![("page", "1".to_string()), ("limit", "20".to_string())]
        );
    }

    #[test]
    fn test_zero_page_or_limit_is_rejected() {
        assert!(PageRequest::new(0, 20).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert_eq!(PageRequest::new(3, 5).unwrap().page(), 3);
    }

    #[test]
    fn test_pagination_from_backend_json() {
        let pagination: Pagination =
            serde_json::from_str(r#"{"page":2,"limit":20,"total":45,"totalPages":3}"#).unwrap();
        assert!(pagination.has_next());
        assert_eq!(pagination.total, 45);
    }

    #[test]
    fn test_user_search_trims_and_rejects_blank() {
        let search = UserSearch::new("  ann ", PageRequest::default()).unwrap();
        assert_eq!(search.query(), "ann");
        assert_eq!(search.query_pairs()[0], ("q", "ann".to_string()));

        assert!(matches!(
            UserSearch::new("   ", PageRequest::default()),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
