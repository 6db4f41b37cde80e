//! Paging types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Maximum page size; larger requests are capped.
pub const MAX_PAGE_SIZE: u32 = 50;

/// A normalized page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page_number: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Create a new page request, clamping both values into range.
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Paging metadata sent to clients in the `X-Pagination` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetaData {
    /// Current page number (1-based).
    pub current_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_count: u64,
    /// Whether a previous page exists.
    pub has_previous: bool,
    /// Whether a next page exists.
    pub has_next: bool,
}

impl MetaData {
    /// Compute metadata for a page of a result set with `total_count` items.
    pub fn new(total_count: u64, page: PageRequest) -> Self {
        let page_size = u64::from(page.page_size.max(1));
        let total_pages = total_count.div_ceil(page_size) as u32;
        Self {
            current_page: page.page_number,
            total_pages,
            page_size: page.page_size,
            total_count,
            has_previous: page.page_number > 1,
            has_next: page.page_number < total_pages,
        }
    }
}

/// One page of items together with its paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedList<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Paging metadata.
    pub meta_data: MetaData,
}

impl<T> PagedList<T> {
    /// Wrap an already-paged slice of a result set.
    pub fn new(items: Vec<T>, total_count: u64, page: PageRequest) -> Self {
        Self {
            items,
            meta_data: MetaData::new(total_count, page),
        }
    }

    /// Page a complete, already-ordered result set in memory.
    pub fn to_paged_list(source: Vec<T>, page: PageRequest) -> Self {
        let total_count = source.len() as u64;
        let items = source
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Self::new(items, total_count, page)
    }

    /// Transform every item while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            meta_data: self.meta_data,
        }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
