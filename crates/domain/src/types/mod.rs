//! Transfer types returned by the admin API
//!
//! Every type here is a plain record owned by the response that produced it.
//! Views replace them wholesale on the next successful fetch.

pub mod access;
pub mod actions;
pub mod contact;
pub mod filter;
pub mod health;
pub mod member;
pub mod message;
pub mod paging;
pub mod query;
pub mod session;
pub mod stats;

pub use access::{AccessGrant, AccessRequestResult, AccessStatus};
pub use actions::{ActionResult, CopyToSheetResult, SessionControlResponse};
pub use contact::Contact;
pub use filter::{DiscoverGroupsResponse, DiscoveredGroup, FilterGroup, FilterGroupList, FilterMode};
pub use health::{BreakerHealth, BreakerState, HealthReport};
pub use member::{GroupMember, GroupMembersPage, GroupSummary, MemberRole};
pub use message::Message;
pub use paging::{page_count_for, PagedResult};
pub use query::ListQuery;
pub use session::{CurrentUser, SessionIdentity, SessionState, SessionStatus};
pub use stats::Stats;
