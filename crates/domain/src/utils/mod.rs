//! Helpers for normalizing upstream data at the deserialization boundary

pub mod normalize;

pub use normalize::{is_truthy_flag, phone_from_jid};
