//! Configuration loading
//!
//! Merges built-in defaults, an optional config file and environment
//! variables into a [`wadash_domain::Config`].

pub mod loader;

// Re-export commonly used items
pub use loader::{apply_env, load, load_from_file, probe_config_paths};
