//! Settings shared by the option engine and the storefront layer.
//!
//! The bundle app stores its configuration on each variant as three
//! JSON-encoded metafields under a single namespace (`simple_bundles` by
//! default). The keys are fixed; only the namespace is configurable.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Metafield namespace used by the bundle app when none is configured.
pub const DEFAULT_METAFIELD_NAMESPACE: &str = "simple_bundles";

/// The three recognized metafield keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetafieldKey {
    /// Fixed bundle components, or an `"Infinite options"` marker.
    BundledVariants,
    /// One-level option list; also carries per-value inventory.
    VariantOptions,
    /// Two-level option list (sections of sub-options).
    VariantOptionsV2,
}

impl MetafieldKey {
    pub const ALL: [Self; 3] = [
        Self::BundledVariants,
        Self::VariantOptions,
        Self::VariantOptionsV2,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BundledVariants => "bundled_variants",
            Self::VariantOptions => "variant_options",
            Self::VariantOptionsV2 => "variant_options_v2",
        }
    }
}

impl std::fmt::Display for MetafieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the initial value of each option group is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSelection {
    /// Always the first candidate value, even when it is out of stock.
    #[default]
    FirstCandidate,
    /// The first value that is selectable; index 0 when none is.
    FirstAvailable,
}

impl FromStr for DefaultSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_candidate" => Ok(Self::FirstCandidate),
            "first_available" => Ok(Self::FirstAvailable),
            other => Err(format!(
                "unknown default selection policy '{other}'; expected first_candidate or first_available"
            )),
        }
    }
}

/// How per-group values are joined into the encoded selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Sub-options of one section are joined with `" ++ "`, sections with `" <> "`.
    #[default]
    Nested,
    /// Every group is joined with `" <> "`, ignoring sections.
    Flat,
}

impl FromStr for JoinMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nested" => Ok(Self::Nested),
            "flat" => Ok(Self::Flat),
            other => Err(format!(
                "unknown join mode '{other}'; expected nested or flat"
            )),
        }
    }
}

/// Knobs for the bundle option engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSettings {
    pub namespace: String,
    pub default_selection: DefaultSelection,
    pub join_mode: JoinMode,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_METAFIELD_NAMESPACE.to_string(),
            default_selection: DefaultSelection::default(),
            join_mode: JoinMode::default(),
        }
    }
}
