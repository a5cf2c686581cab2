//! Fixed-bundle contents from the `bundled_variants` metafield.
//!
//! Purely informational: the descriptor drives the "This bundle includes"
//! list and has no effect on option selection or encoding.

use serde::Serialize;

use bundlebox_core::products::DEFAULT_VARIANT_TITLE;
use bundlebox_core::MetafieldKey;

use crate::metafield::decode_metafield;
use crate::types::{RawBundledVariant, INFINITE_OPTIONS_TYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    /// A product made of fixed sub-items.
    FixedBundle,
    /// A "build your own" product; components come from option selection.
    InfiniteOptions,
    /// No usable `bundled_variants` metafield.
    NoBundle,
}

/// One fixed component of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleLineItem {
    pub quantity_in_bundle: u32,
    pub product_title: String,
    pub variant_title: String,
}

impl BundleLineItem {
    /// Text of one "included items" entry, e.g. `"2 x Sock - Blue"`.
    ///
    /// The variant suffix is dropped for option-less products.
    #[must_use]
    pub fn label(&self) -> String {
        if self.variant_title == DEFAULT_VARIANT_TITLE {
            format!("{} x {}", self.quantity_in_bundle, self.product_title)
        } else {
            format!(
                "{} x {} - {}",
                self.quantity_in_bundle, self.product_title, self.variant_title
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleDescriptor {
    pub kind: BundleKind,
    pub items: Vec<BundleLineItem>,
}

impl BundleDescriptor {
    #[must_use]
    pub fn none() -> Self {
        Self {
            kind: BundleKind::NoBundle,
            items: Vec::new(),
        }
    }

    /// Builds the descriptor from the raw `bundled_variants` metafield.
    #[must_use]
    pub fn from_metafield(raw: Option<&str>) -> Self {
        let Some(parsed) =
            decode_metafield::<Vec<RawBundledVariant>>(MetafieldKey::BundledVariants, raw)
        else {
            return Self::none();
        };

        let kind = match parsed.first() {
            None => BundleKind::NoBundle,
            Some(first) if first.kind.as_deref() == Some(INFINITE_OPTIONS_TYPE) => {
                BundleKind::InfiniteOptions
            }
            Some(_) => BundleKind::FixedBundle,
        };

        let items = parsed
            .into_iter()
            .map(|raw| BundleLineItem {
                quantity_in_bundle: raw.quantity_in_bundle,
                product_title: raw.product_title,
                variant_title: raw.variant_title,
            })
            .collect();

        Self { kind, items }
    }

    /// Items to list under "This bundle includes", or `None` when the list
    /// is suppressed (infinite-options products and non-bundles).
    #[must_use]
    pub fn included_items(&self) -> Option<&[BundleLineItem]> {
        if self.kind == BundleKind::InfiniteOptions || self.items.is_empty() {
            None
        } else {
            Some(&self.items)
        }
    }
}
