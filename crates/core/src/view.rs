//! View state for fetched resources and paginated lists
//!
//! Every fetch takes a ticket. Completing with a ticket that is no longer the
//! latest is a no-op, so a slow response can never overwrite the result of a
//! request issued after it. A failed fetch keeps whatever data was already
//! shown and records a message for the renderer.

use std::future::Future;

use parking_lot::Mutex;
use tracing::debug;
use wadash_domain::{GroupMembersPage, ListQuery, PagedResult, Result};

/// Identifies one fetch of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Loading flag, last good value and last error of one resource.
#[derive(Debug, Clone)]
pub struct ResourceView<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for ResourceView<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None, generation: 0 }
    }
}

impl<T> ResourceView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a fetch as started; earlier tickets become stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket { generation: self.generation }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a fetch result. Returns `false` when the ticket is stale and
    /// the result was dropped.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<T>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "Dropping stale response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(value) => {
                self.data = Some(value);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message());
            }
        }
        true
    }
}

/// Paging metadata a list response exposes.
pub trait PageInfo {
    fn current_page(&self) -> u32;
    fn page_count(&self) -> u64;
}

impl<T> PageInfo for PagedResult<T> {
    fn current_page(&self) -> u32 {
        self.page
    }

    fn page_count(&self) -> u64 {
        self.page_count
    }
}

impl PageInfo for GroupMembersPage {
    fn current_page(&self) -> u32 {
        self.page.page
    }

    fn page_count(&self) -> u64 {
        self.page.page_count
    }
}

/// A paginated list plus the query that produced it.
#[derive(Debug, Clone)]
pub struct PagedView<P> {
    query: ListQuery,
    resource: ResourceView<P>,
}

impl<P: PageInfo> PagedView<P> {
    pub fn new(query: ListQuery) -> Self {
        Self { query, resource: ResourceView::new() }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn resource(&self) -> &ResourceView<P> {
        &self.resource
    }

    pub fn data(&self) -> Option<&P> {
        self.resource.data()
    }

    /// Sets the search text; any change returns to page 1.
    pub fn set_search(&mut self, search: &str) -> bool {
        let search = Some(search.trim()).filter(|s| !s.is_empty()).map(str::to_string);
        if search == self.query.search {
            return false;
        }
        self.query.search = search;
        self.query.page = 1;
        true
    }

    /// Sets the group filter; any change returns to page 1.
    pub fn set_group(&mut self, group_id: Option<&str>) -> bool {
        let group_id = group_id.map(str::trim).filter(|g| !g.is_empty()).map(str::to_string);
        if group_id == self.query.group_id {
            return false;
        }
        self.query.group_id = group_id;
        self.query.page = 1;
        true
    }

    pub fn has_next(&self) -> bool {
        self.data().is_some_and(|page| u64::from(self.query.page) < page.page_count())
    }

    pub fn has_previous(&self) -> bool {
        self.query.page > 1
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.query.page += 1;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.query.page -= 1;
        true
    }

    /// Starts a fetch for the current query.
    pub fn begin(&mut self) -> (FetchTicket, ListQuery) {
        (self.resource.begin(), self.query.clone())
    }

    pub fn complete(&mut self, ticket: FetchTicket, result: Result<P>) -> bool {
        self.resource.complete(ticket, result)
    }
}

/// Fetches the current query of a shared view without holding the lock
/// across the request.
pub async fn refresh_shared<P, F, Fut>(view: &Mutex<PagedView<P>>, fetch: F) -> bool
where
    P: PageInfo,
    F: FnOnce(ListQuery) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let (ticket, query) = view.lock().begin();
    let result = fetch(query).await;
    let applied = view.lock().complete(ticket, result);
    applied
}
