//! # wadash Core
//!
//! Client-side behavior of the admin dashboard - no HTTP code.
//!
//! This crate contains:
//! - Port interfaces for every backend operation (traits)
//! - The periodic status poller and the surfaces built on it
//! - View state for paginated lists and single resources
//! - The group discovery and spreadsheet access flows
//!
//! ## Architecture Principles
//! - Only depends on `wadash-domain`
//! - No network, filesystem, or terminal code
//! - All backend access via traits
//! - Pollers own their timers; stopping one never affects another

pub mod access;
pub mod discovery;
pub mod polling;
pub mod ports;
pub mod session;
pub mod status;
pub mod view;

#[cfg(test)]
mod test_support;

pub use access::{validate_email, AccessFlow, AccessRequestOutcome};
pub use discovery::{DiscoveryEntry, DiscoveryFlow, DiscoveryState, EntryStatus};
pub use polling::{
    PollControl, PollOutcome, PollerHandle, StatusCheck, StatusObserver, StatusPoller,
};
pub use ports::{AccessPort, AllowlistPort, DataPort, ExportPort, SessionPort};
pub use session::{SessionService, SessionSnapshot, RESTART_SETTLE};
pub use status::{
    BannerState, ConnectionGate, Connectivity, CurrentUserCheck, QrScanWatcher, QrWaitState,
    SessionCheck, StatusBanner,
};
pub use view::{refresh_shared, FetchTicket, PageInfo, PagedView, ResourceView};
