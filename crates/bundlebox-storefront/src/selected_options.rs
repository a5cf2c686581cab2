//! Selected options carried in a product page URL.
//!
//! Product URLs look like `/products/tee?Size=M&Color=Red`. Shopify appends
//! its own tracking parameters (`_pos`, `_sid`, `_ss`, `_psq`, `_v`), which
//! must not be sent as options.

use bundlebox_core::SelectedOption;
use reqwest::Url;

use crate::error::StorefrontError;

const IGNORED_PREFIXES: [&str; 5] = ["_sid", "_pos", "_psq", "_ss", "_v"];

/// Parses the selected options from a full product page URL.
///
/// # Errors
///
/// Returns [`StorefrontError::InvalidRequestUrl`] if `url` does not parse.
pub fn selected_options_from_url(url: &str) -> Result<Vec<SelectedOption>, StorefrontError> {
    let parsed = Url::parse(url).map_err(|e| StorefrontError::InvalidRequestUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(collect(parsed.query_pairs()))
}

/// Parses the selected options from a bare query string, with or without
/// the leading `?`.
#[must_use]
pub fn selected_options_from_query(query: &str) -> Vec<SelectedOption> {
    let query = query.strip_prefix('?').unwrap_or(query);
    match Url::parse(&format!("http://localhost/?{query}")) {
        Ok(parsed) => collect(parsed.query_pairs()),
        Err(_) => Vec::new(),
    }
}

fn collect<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<SelectedOption>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .filter(|(name, _)| {
            let name = name.as_ref();
            !name.is_empty() && !IGNORED_PREFIXES.iter().any(|p| name.starts_with(p))
        })
        .map(|(name, value)| SelectedOption {
            name: name.as_ref().to_owned(),
            value: value.as_ref().to_owned(),
        })
        .collect()
}
