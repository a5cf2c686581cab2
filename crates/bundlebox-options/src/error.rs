use thiserror::Error;

use bundlebox_core::MetafieldKey;

/// Errors surfaced to callers of the option engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The caller tried to select a value for a group that does not exist.
    #[error("unknown option group \"{name}\"")]
    UnknownSelectionTarget { name: String },

    /// The value is not one of the group's candidate values.
    #[error("\"{value}\" is not a value of option group \"{group}\"")]
    UnknownOptionValue { group: String, value: String },

    /// The value is a candidate but its stock level is zero.
    #[error("\"{value}\" of option group \"{group}\" is out of stock")]
    UnavailableOptionValue { group: String, value: String },
}

/// Decode failures for vendor-authored metafield content.
///
/// These never reach the end user: [`crate::metafield`] logs them and
/// degrades to "no metafield".
#[derive(Debug, Error)]
pub enum MetafieldError {
    #[error("metafield {key} is not valid JSON: {source}")]
    MalformedJson {
        key: MetafieldKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("metafield {key} does not match the expected shape: {source}")]
    SchemaMismatch {
        key: MetafieldKey,
        #[source]
        source: serde_json::Error,
    },
}
