use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};
use wadash_domain::constants::DEFAULT_CSV_FILENAME;
use wadash_domain::Result;

use crate::errors::InfraError;

/// File name announced by a `Content-Disposition` header.
///
/// Takes the text after `filename=` up to the next `;`, drops quotes and any
/// directory components. Falls back to `contacts.csv`.
pub fn filename_from_disposition(disposition: Option<&str>) -> String {
    disposition
        .and_then(|value| value.split_once("filename="))
        .map(|(_, rest)| rest.split(';').next().unwrap_or_default().replace('"', ""))
        .and_then(|raw| {
            Path::new(raw.trim())
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_CSV_FILENAME.to_string())
}

/// Writes `bytes` to `dest_dir/filename`.
///
/// The staged temporary file is removed on every failure path.
pub fn persist_csv(dest_dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let mut staged = NamedTempFile::new_in(dest_dir).map_err(InfraError::from)?;
    debug!(staged = %staged.path().display(), bytes = bytes.len(), "Staging export");

    staged.write_all(bytes).map_err(InfraError::from)?;
    staged.flush().map_err(InfraError::from)?;

    let destination = dest_dir.join(filename);
    staged.persist(&destination).map_err(InfraError::from)?;

    info!(path = %destination.display(), "Export written");
    Ok(destination)
}
