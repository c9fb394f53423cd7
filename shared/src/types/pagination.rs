//! Pagination types for list queries and responses

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Maximum number of items per page
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Create pagination parameters, clamping out-of-range values
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Row offset for SQL queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Row limit for SQL queries
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// One page of repository results: the items plus the unpaged total
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Total number of matching items across all pages
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// An empty page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Map the items into another type, keeping the total
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Paginated response envelope for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page
    pub data: Vec<T>,

    /// Current page number (1-based)
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of items
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,

    /// Whether a next page exists
    pub has_next: bool,

    /// Whether a previous page exists
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    /// Build a response envelope from a result page and its query parameters
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let per_page = pagination.per_page.max(1);
        let total_pages = ((total + u64::from(per_page) - 1) / u64::from(per_page)) as u32;
        Self {
            data,
            page: pagination.page,
            per_page,
            total,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1 && total_pages > 0,
        }
    }

    /// Build a response envelope from a repository page
    pub fn from_page(page: Page<T>, pagination: Pagination) -> Self {
        let total = page.total;
        Self::new(page.items, pagination, total)
    }
}
