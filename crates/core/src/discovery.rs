//! Group discovery and allowlisting flow
//!
//! ```text
//! Idle -> Discovering -> Listing -> Adding(id) -> Synced(id) -> Listing
//!              |                        |
//!              v                        v
//!          Failed(msg)          Listing (error recorded)
//! ```
//!
//! `Synced` is the short window in which a freshly added group is shown as
//! syncing before it settles into the "added" badge.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, instrument, warn};
use wadash_domain::constants::DISCOVERY_NOTES;
use wadash_domain::{DashError, DiscoveredGroup, FilterGroupList, Result};

use crate::ports::AllowlistPort;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum DiscoveryState {
    Idle,
    Discovering,
    Listing,
    Adding(String),
    Synced(String),
    Failed(String),
}

/// How a discovered group is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Available,
    Syncing,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryEntry {
    #[serde(flatten)]
    pub group: DiscoveredGroup,
    pub status: EntryStatus,
}

#[derive(Debug, Clone)]
pub struct DiscoveryFlow {
    state: DiscoveryState,
    discovered: Vec<DiscoveredGroup>,
    allowlisted: HashSet<String>,
    filter: String,
    last_error: Option<String>,
}

impl DiscoveryFlow {
    /// Starts idle, knowing which groups are already on the allowlist.
    pub fn new(allowlist: &FilterGroupList) -> Self {
        Self {
            state: DiscoveryState::Idle,
            discovered: Vec::new(),
            allowlisted: allowlist.groups.iter().map(|g| g.group_id.clone()).collect(),
            filter: String::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> &DiscoveryState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn discovered(&self) -> &[DiscoveredGroup] {
        &self.discovered
    }

    /// Replaces the known allowlist, e.g. after a reload.
    pub fn sync_allowlist(&mut self, allowlist: &FilterGroupList) {
        self.allowlisted = allowlist.groups.iter().map(|g| g.group_id.clone()).collect();
    }

    /// Fetches discoverable groups. Clears the filter.
    ///
    /// A `success: false` reply fails the flow and surfaces as
    /// `DashError::Api` with status 200 and the backend's message.
    #[instrument(skip(self, port))]
    pub async fn discover(&mut self, port: &dyn AllowlistPort) -> Result<()> {
        if matches!(self.state, DiscoveryState::Discovering | DiscoveryState::Adding(_)) {
            return Err(self.invalid("discover"));
        }

        self.state = DiscoveryState::Discovering;
        self.filter.clear();
        self.last_error = None;

        match port.discover_groups().await {
            Ok(response) if response.success => {
                info!(groups = response.groups.len(), "Discovered groups");
                self.discovered = response.groups;
                self.state = DiscoveryState::Listing;
                Ok(())
            }
            Ok(response) => {
                warn!(message = %response.message, "Discovery rejected by backend");
                self.fail(response.message.clone());
                Err(DashError::Api { status: 200, message: response.message })
            }
            Err(err) => {
                warn!(error = %err, "Discovery failed");
                self.fail(err.user_message());
                Err(err)
            }
        }
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Discovered groups matching the filter, in discovery order.
    pub fn visible(&self) -> Vec<DiscoveryEntry> {
        self.discovered
            .iter()
            .filter(|group| group.matches(&self.filter))
            .map(|group| DiscoveryEntry {
                group: group.clone(),
                status: self.status_of(&group.group_id),
            })
            .collect()
    }

    pub fn status_of(&self, group_id: &str) -> EntryStatus {
        match &self.state {
            DiscoveryState::Adding(id) | DiscoveryState::Synced(id) if id == group_id => {
                EntryStatus::Syncing
            }
            _ if self.allowlisted.contains(group_id) => EntryStatus::Added,
            _ => EntryStatus::Available,
        }
    }

    /// Adds a discovered group to the allowlist.
    #[instrument(skip(self, port))]
    pub async fn add(&mut self, port: &dyn AllowlistPort, group_id: &str) -> Result<()> {
        if !matches!(self.state, DiscoveryState::Listing | DiscoveryState::Synced(_)) {
            return Err(self.invalid("add"));
        }
        let group = self
            .discovered
            .iter()
            .find(|group| group.group_id == group_id)
            .cloned()
            .ok_or_else(|| {
                DashError::InvalidInput(format!("Group {group_id} was not discovered"))
            })?;
        if self.allowlisted.contains(group_id) {
            return Err(DashError::InvalidInput(format!("Group {group_id} is already allowlisted")));
        }

        self.state = DiscoveryState::Adding(group.group_id.clone());
        self.last_error = None;

        match port.add_filter_group(&group.group_id, &group.group_name, DISCOVERY_NOTES).await {
            Ok(_) => {
                info!(group_id = %group.group_id, "Group added from discovery");
                self.allowlisted.insert(group.group_id.clone());
                self.state = DiscoveryState::Synced(group.group_id);
                Ok(())
            }
            Err(err) => {
                warn!(group_id = %group.group_id, error = %err, "Failed to add group");
                self.last_error = Some(err.user_message());
                self.state = DiscoveryState::Listing;
                Err(err)
            }
        }
    }

    /// Ends the syncing indicator.
    pub fn acknowledge_sync(&mut self) {
        if matches!(self.state, DiscoveryState::Synced(_)) {
            self.state = DiscoveryState::Listing;
        }
    }

    pub fn reset(&mut self) {
        self.state = DiscoveryState::Idle;
        self.discovered.clear();
        self.filter.clear();
        self.last_error = None;
    }

    fn fail(&mut self, message: String) {
        self.last_error = Some(message.clone());
        self.state = DiscoveryState::Failed(message);
    }

    fn invalid(&self, action: &str) -> DashError {
        DashError::InvalidInput(format!("Cannot {action} while {:?}", self.state))
    }
}
