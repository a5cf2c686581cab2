//! Serde shapes of the bundle app's variant metafields.
//!
//! ## Observed shapes
//!
//! ### `bundled_variants`
//! A JSON array of bundle components:
//! `[{"quantity_in_bundle": 2, "product_title": "Sock", "variant_title": "Blue"}]`.
//! "Build your own" products use the same key with a marker element whose
//! `type` is `"Infinite options"`; those elements carry no component fields,
//! so every field is `#[serde(default)]`.
//!
//! ### `variant_options`
//! A one-level array: `[{"optionName": "Size", "optionValues": "Small, Medium",
//! "optionInventories": "0,5"}]`. Older stores only use it as an inventory
//! table (no `optionValues`); newer ones also carry the values.
//!
//! ### `variant_options_v2`
//! A two-level array of sections, each a list of sub-options:
//! `[[{"optionName": "Shirt", "optionValues": "S, M"}, {"optionName": "Hat", ...}], ...]`.
//! Inventories are never present here; they are looked up by name in
//! `variant_options`.

use serde::Deserialize;

/// Marker `type` value for configurable "build your own" bundles.
pub const INFINITE_OPTIONS_TYPE: &str = "Infinite options";

/// One element of the `bundled_variants` metafield.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBundledVariant {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub quantity_in_bundle: u32,

    #[serde(default)]
    pub product_title: String,

    #[serde(default)]
    pub variant_title: String,
}

/// One option definition from `variant_options` or `variant_options_v2`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOption {
    pub option_name: String,

    /// Comma-and-space separated values, e.g. `"Small, Medium, Large"`.
    #[serde(default)]
    pub option_values: Option<String>,

    /// Comma separated stock levels aligned by index with `option_values`,
    /// e.g. `"0,5,5"`.
    #[serde(default)]
    pub option_inventories: Option<String>,
}
