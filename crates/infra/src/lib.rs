//! # wadash Infrastructure
//!
//! Infrastructure implementations of the `wadash-core` ports.
//!
//! This crate contains:
//! - The HTTP request primitive (timeouts, retries, error extraction)
//! - The typed admin API client
//! - The CSV export sink
//! - Configuration loading (defaults, file, environment)
//!
//! ## Architecture
//! - Implements traits defined in `wadash-core`
//! - Depends on `wadash-domain` and `wadash-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod export;
pub mod http;

// Re-export commonly used items
pub use api::ApiClient;
pub use errors::InfraError;
pub use http::{HttpClient, RawResponse, RequestOptions, RetryPolicy};
