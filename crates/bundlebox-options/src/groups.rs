//! Option groups derived from the option metafields.
//!
//! Two schema generations exist in the wild. The one-level `variant_options`
//! list and the two-level `variant_options_v2` list are both reduced to one
//! [`OptionGroup`] per logical option through the [`OptionSource`] trait;
//! which strategy applies is decided once, by which metafield is present.

use std::collections::HashSet;

use serde::Serialize;

use bundlebox_core::{DefaultSelection, MetafieldKey, VariantMetafields};

use crate::metafield::decode_metafield;
use crate::types::RawOption;

/// Separator between values in `optionValues`.
const VALUE_SEPARATOR: &str = ", ";

/// Separator between stock levels in `optionInventories`.
const INVENTORY_SEPARATOR: char = ',';

/// Stock entry that hides a value.
const OUT_OF_STOCK: &str = "0";

/// One configurable option axis, e.g. `Size: Small, Medium, Large`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    pub name: String,
    /// Candidate values in payload order.
    pub candidate_values: Vec<String>,
    /// Trimmed stock entries aligned by index with `candidate_values`.
    /// Shorter than the value list (or empty) when the store sent fewer
    /// entries. Only an entry that is literally `0` marks a value as out of
    /// stock; `00`, `-0` and non-numbers count as available.
    pub inventory: Vec<String>,
    /// Index of the section this group came from. Groups sharing a section
    /// are joined with `" ++ "` by the nested encoding.
    pub section: usize,
}

/// A value as rendered in the option's select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionValue<'a> {
    pub value: &'a str,
    pub available: bool,
}

impl OptionGroup {
    /// Returns `false` only when the stock entry at `index` is exactly `0`.
    #[must_use]
    pub fn is_available(&self, index: usize) -> bool {
        self.inventory.get(index).map(String::as_str) != Some(OUT_OF_STOCK)
    }

    /// Every candidate value with its availability flag.
    #[must_use]
    pub fn values(&self) -> Vec<OptionValue<'_>> {
        self.candidate_values
            .iter()
            .enumerate()
            .map(|(i, value)| OptionValue {
                value,
                available: self.is_available(i),
            })
            .collect()
    }

    /// Values the select list offers; out-of-stock values are hidden.
    pub fn selectable_values(&self) -> impl Iterator<Item = &str> {
        self.candidate_values
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_available(*i))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.candidate_values.iter().any(|v| v == value)
    }

    /// `value` is a candidate and in stock.
    #[must_use]
    pub fn is_selectable(&self, value: &str) -> bool {
        self.selectable_values().any(|v| v == value)
    }

    /// The value a fresh selection starts with under `policy`.
    #[must_use]
    pub fn default_value(&self, policy: DefaultSelection) -> Option<&str> {
        let first = self.candidate_values.first().map(String::as_str);
        match policy {
            DefaultSelection::FirstCandidate => first,
            DefaultSelection::FirstAvailable => self.selectable_values().next().or(first),
        }
    }
}

/// A schema generation of the option metafields.
pub trait OptionSource {
    /// Metafield the definitions were read from.
    fn key(&self) -> MetafieldKey;

    /// Option definitions grouped by section, in payload order.
    fn sections(&self) -> Vec<&[RawOption]>;
}

/// `variant_options`: each entry is its own section.
#[derive(Debug)]
pub struct FlatOptions(pub Vec<RawOption>);

impl OptionSource for FlatOptions {
    fn key(&self) -> MetafieldKey {
        MetafieldKey::VariantOptions
    }

    fn sections(&self) -> Vec<&[RawOption]> {
        self.0.iter().map(std::slice::from_ref).collect()
    }
}

/// `variant_options_v2`: each outer entry is a section of sub-options.
#[derive(Debug)]
pub struct NestedOptions(pub Vec<Vec<RawOption>>);

impl OptionSource for NestedOptions {
    fn key(&self) -> MetafieldKey {
        MetafieldKey::VariantOptionsV2
    }

    fn sections(&self) -> Vec<&[RawOption]> {
        self.0.iter().map(Vec::as_slice).collect()
    }
}

/// Builds option groups from `source`, taking stock levels from `inventory`
/// by exact option-name match.
///
/// Only the first definition of an option name is kept.
#[must_use]
pub fn build_groups(
    source: &dyn OptionSource,
    inventory: Option<&[RawOption]>,
) -> Vec<OptionGroup> {
    let mut seen = HashSet::new();
    let mut groups = Vec::new();

    for (section, options) in source.sections().into_iter().enumerate() {
        for option in options {
            let Some(raw_values) = option.option_values.as_deref() else {
                tracing::debug!(
                    key = %source.key(),
                    option = %option.option_name,
                    "option definition has no values, skipping"
                );
                continue;
            };

            if !seen.insert(option.option_name.as_str()) {
                tracing::debug!(
                    key = %source.key(),
                    option = %option.option_name,
                    "duplicate option definition, keeping the first"
                );
                continue;
            }

            let candidate_values: Vec<String> =
                raw_values.split(VALUE_SEPARATOR).map(str::to_owned).collect();
            let inventory = lookup_inventory(inventory, &option.option_name);

            if !inventory.is_empty() && inventory.len() < candidate_values.len() {
                tracing::debug!(
                    option = %option.option_name,
                    values = candidate_values.len(),
                    inventories = inventory.len(),
                    "inventory list shorter than values, treating the rest as available"
                );
            }

            groups.push(OptionGroup {
                name: option.option_name.clone(),
                candidate_values,
                inventory,
                section,
            });
        }
    }

    groups
}

fn lookup_inventory(inventory: Option<&[RawOption]>, name: &str) -> Vec<String> {
    inventory
        .and_then(|entries| entries.iter().find(|e| e.option_name == name))
        .and_then(|entry| entry.option_inventories.as_deref())
        .map(parse_inventories)
        .unwrap_or_default()
}

fn parse_inventories(raw: &str) -> Vec<String> {
    raw.split(INVENTORY_SEPARATOR)
        .map(|s| s.trim().to_owned())
        .collect()
}

/// Derives option groups from a variant's metafields.
///
/// `variant_options_v2` wins when it decodes; otherwise `variant_options` is
/// used if its entries carry values. With neither, there are no groups.
#[must_use]
pub fn groups_from_metafields(metafields: &VariantMetafields) -> Vec<OptionGroup> {
    let flat: Option<Vec<RawOption>> = decode_metafield(
        MetafieldKey::VariantOptions,
        metafields.variant_options.as_deref(),
    );
    let nested: Option<Vec<Vec<RawOption>>> = decode_metafield(
        MetafieldKey::VariantOptionsV2,
        metafields.variant_options_v2.as_deref(),
    );

    if let Some(nested) = nested {
        return build_groups(&NestedOptions(nested), flat.as_deref());
    }

    match flat {
        Some(flat) if flat.iter().any(|o| o.option_values.is_some()) => {
            let source = FlatOptions(flat);
            build_groups(&source, Some(source.0.as_slice()))
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "groups_test.rs"]
mod tests;
