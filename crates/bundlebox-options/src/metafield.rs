//! Tolerant decoding of vendor-authored metafield JSON.
//!
//! Metafield content is written by a third-party app and by merchants, so it
//! is untrusted. A decode failure must never stop the rest of the page from
//! rendering: every failure is logged for operators and turned into `None`.

use serde::de::DeserializeOwned;

use bundlebox_core::MetafieldKey;

use crate::error::MetafieldError;

/// Parses a raw metafield string into JSON.
///
/// Returns `None` when the metafield is unset or not valid JSON. The latter
/// is logged at `warn` and otherwise swallowed.
#[must_use]
pub fn parse_metafield(key: MetafieldKey, raw: Option<&str>) -> Option<serde_json::Value> {
    let raw = raw?;
    match try_parse(key, raw) {
        Ok(value) => Some(value),
        Err(e) => {
            report(&e);
            None
        }
    }
}

/// Parses a raw metafield string and decodes it into `T`.
///
/// A schema mismatch is treated like malformed JSON: logged, then `None`.
#[must_use]
pub fn decode_metafield<T: DeserializeOwned>(key: MetafieldKey, raw: Option<&str>) -> Option<T> {
    let value = parse_metafield(key, raw)?;
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(source) => {
            report(&MetafieldError::SchemaMismatch { key, source });
            None
        }
    }
}

fn try_parse(key: MetafieldKey, raw: &str) -> Result<serde_json::Value, MetafieldError> {
    serde_json::from_str(raw).map_err(|source| MetafieldError::MalformedJson { key, source })
}

fn report(err: &MetafieldError) {
    tracing::warn!(error = %err, "ignoring unusable bundle metafield");
}
