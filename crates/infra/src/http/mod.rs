//! HTTP request primitive
//!
//! Every backend call goes through [`HttpClient::request`], which owns the
//! API key header, the per-attempt timeout, the retry loop and the mapping of
//! error responses to `DashError::Api`.

pub mod client;
pub mod query;
pub mod retry;

pub use client::{HttpClient, HttpClientBuilder, RawResponse, RequestOptions};
pub use query::{build_url, QueryParams};
pub use retry::{retry_with_backoff, RetryPolicy};
