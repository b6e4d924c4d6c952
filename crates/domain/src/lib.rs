//! # wadash Domain
//!
//! Transfer types and shared definitions for the scraper admin client.
//!
//! This crate contains:
//! - Transfer shapes returned by the admin API (messages, contacts, members,
//!   allowlist entries, session state, access grants)
//! - The error taxonomy and Result alias
//! - Configuration structures and their defaults
//! - Constants shared by the client and the pollers
//!
//! ## Architecture
//! - No dependencies on other wadash crates
//! - No I/O; everything here is plain data

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
