//! Typed admin API client
//!
//! [`ApiClient`] maps every backend endpoint onto the `wadash-core` ports.

mod client;
mod paths;

pub use client::ApiClient;
