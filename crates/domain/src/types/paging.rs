//! Paginated list envelope

use serde::{Deserialize, Serialize};

/// Number of pages needed for `total` rows at `limit` rows per page.
///
/// A zero limit yields zero pages rather than dividing by zero.
pub fn page_count_for(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}

/// One page of rows plus the totals needed to render pagination controls
///
/// Wire names are `data` and `pages`; the Rust names describe the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "pages")]
    pub page_count: u64,
}

impl<T> PagedResult<T> {
    /// Build a page, deriving `page_count` from `total` and `limit`.
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self { items, total, page, limit, page_count: page_count_for(total, limit) }
    }

    /// Empty first page, used before anything has been fetched.
    pub fn empty(limit: u32) -> Self {
        Self::new(Vec::new(), 0, 1, limit)
    }

    /// Whether the envelope satisfies the paging invariants.
    ///
    /// `page >= 1`, `limit >= 1`, `items.len() <= limit` and
    /// `page_count == ceil(total / limit)`.
    pub fn is_consistent(&self) -> bool {
        self.page >= 1
            && self.limit >= 1
            && self.items.len() <= self.limit as usize
            && self.page_count == page_count_for(self.total, self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based index range of the rows on this page, for "Showing a-b of n".
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.items.is_empty() {
            return None;
        }
        let start = u64::from(self.page.saturating_sub(1)) * u64::from(self.limit) + 1;
        let end = start + self.items.len() as u64 - 1;
        Some((start, end))
    }
}
