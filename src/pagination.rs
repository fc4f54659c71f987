//! Pagination primitives shared by the repository and service layers.

use serde::Serialize;

/// Subcategory listings show 24 records per page.
pub const SUBCATEGORIES_PER_PAGE: usize = 24;
/// Software listings show 20 records per page.
pub const SOFTWARE_PER_PAGE: usize = 20;
/// The banner quick-search caps each entity list at 10 matches.
pub const BANNER_SEARCH_LIMIT: usize = 10;
/// "Top software" views return at most 6 records.
pub const TOP_SOFTWARE_LIMIT: usize = 6;
/// Enriched subcategory listings attach at most 4 software records each.
pub const ENRICHED_SOFTWARE_LIMIT: usize = 4;
/// "Top subcategories" ranking returns at most 8 records.
pub const TOP_SUBCATEGORIES_LIMIT: usize = 8;

/// 1-based page selector. Pages below 1 are normalized to 1 rather than
/// rejected, so a `page=0` query string degrades to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Number of records to skip before the current page.
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// A page of records together with the metadata the catalog frontend pages
/// through.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_count: usize, per_page: usize) -> Self {
        Self {
            items,
            current_page: page.max(1),
            total_pages: total_count.div_ceil(per_page),
            total_count,
        }
    }

    /// Map the page items while keeping the pagination metadata intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}
