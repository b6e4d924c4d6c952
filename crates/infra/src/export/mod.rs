//! Export file handling
//!
//! Downloads are staged in a temporary file inside the destination directory
//! and then persisted under their final name in a single rename.

mod csv;

pub use csv::{filename_from_disposition, persist_csv};
