//! Query parameters for the paginated list endpoints

use serde::{Deserialize, Serialize};

use crate::constants::{CONTACTS_PAGE_SIZE, MEMBERS_PAGE_SIZE, MESSAGES_PAGE_SIZE};

/// Page, page size and optional filters for a list endpoint
///
/// Empty strings are treated the same as `None` when the query is sent, so a
/// cleared search box never reaches the backend as `search=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub group_id: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self { page: 1, limit: limit.max(1), group_id: None, search: None }
    }

    pub fn messages() -> Self {
        Self::new(MESSAGES_PAGE_SIZE)
    }

    pub fn contacts() -> Self {
        Self::new(CONTACTS_PAGE_SIZE)
    }

    pub fn members() -> Self {
        Self::new(MEMBERS_PAGE_SIZE)
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Query pairs in wire order; `include_group` is false for endpoints
    /// that do not filter by group.
    pub fn params(&self, include_group: bool) -> Vec<(&'static str, Option<String>)> {
        let mut params = vec![
            ("page", Some(self.page.to_string())),
            ("limit", Some(self.limit.to_string())),
        ];
        if include_group {
            params.push(("group_id", self.group_id.clone()));
        }
        params.push(("search", self.search.clone()));
        params
    }
}
