//! URL and query-string construction

use url::Url;
use wadash_domain::{DashError, Result};

/// Query pairs; `None` values are omitted when the URL is built.
pub type QueryParams = Vec<(String, Option<String>)>;

/// Joins `base` and `path` and appends the non-empty query entries.
///
/// Entries whose value is `None` or the empty string are dropped. When no
/// entry remains the URL carries no `?` at all.
pub fn build_url(base: &str, path: &str, query: &[(String, Option<String>)]) -> Result<Url> {
    let raw = format!("{}{}", base.trim_end_matches('/'), path);
    let mut url = Url::parse(&raw)
        .map_err(|e| DashError::Config(format!("Invalid request URL {raw}: {e}")))?;

    let mut present = query
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
        .filter(|(_, value)| !value.is_empty())
        .peekable();

    if present.peek().is_some() {
        url.query_pairs_mut().extend_pairs(present);
    }

    Ok(url)
}
