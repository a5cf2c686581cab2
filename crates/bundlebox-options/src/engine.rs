//! Bundle option engine for one selected variant.
//!
//! Ties the metafield parser, option groups, and selection state together
//! and decides when the host has to be told about a new selection. All
//! methods run synchronously on the caller's thread; one user event is one
//! [`BundleOptionEngine::select`] call.

use indexmap::IndexMap;
use serde::Serialize;

use bundlebox_core::{BundleSettings, VariantMetafields};

use crate::bundle::BundleDescriptor;
use crate::cart::{build_line_item, LineItemRequest, BUNDLE_SELECTION_KEY};
use crate::error::OptionsError;
use crate::groups::{groups_from_metafields, OptionGroup};
use crate::selection::SelectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// No option metafield: nothing to render, empty encoding.
    Uninitialized,
    /// At least one option group; the engine accepts selections.
    Active,
}

/// What the host receives when the selection changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionChange {
    pub encoded: String,
    pub chosen: IndexMap<String, String>,
}

/// A hidden form field carrying the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct BundleOptionEngine {
    settings: BundleSettings,
    bundle: BundleDescriptor,
    groups: Vec<OptionGroup>,
    selection: SelectionState,
    /// Encoding the host last saw (or would see through `initial_emission`).
    last_encoded: String,
    published: bool,
}

impl BundleOptionEngine {
    #[must_use]
    pub fn new(metafields: &VariantMetafields, settings: BundleSettings) -> Self {
        let bundle = BundleDescriptor::from_metafield(metafields.bundled_variants.as_deref());
        let groups = groups_from_metafields(metafields);
        let selection = SelectionState::initialize(&groups, settings.default_selection);
        let last_encoded = selection.encode(&groups, settings.join_mode);

        tracing::debug!(
            groups = groups.len(),
            bundle = ?bundle.kind,
            encoded = %last_encoded,
            "bundle option engine initialized"
        );

        Self {
            settings,
            bundle,
            groups,
            selection,
            last_encoded,
            published: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.groups.is_empty() {
            EngineState::Uninitialized
        } else {
            EngineState::Active
        }
    }

    #[must_use]
    pub fn bundle(&self) -> &BundleDescriptor {
        &self.bundle
    }

    #[must_use]
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn encoded(&self) -> String {
        self.selection.encode(&self.groups, self.settings.join_mode)
    }

    /// The initial selection, handed out once for an active engine.
    pub fn initial_emission(&mut self) -> Option<SelectionChange> {
        if self.published || self.state() == EngineState::Uninitialized {
            return None;
        }
        self.published = true;
        Some(self.snapshot(self.last_encoded.clone()))
    }

    /// Applies a user choice.
    ///
    /// Returns `Ok(Some(_))` only when the encoded selection differs from
    /// the one last emitted; re-selecting the current value yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`OptionsError::UnknownSelectionTarget`] if `group` does not exist.
    /// - [`OptionsError::UnknownOptionValue`] if `value` is not a candidate
    ///   of that group.
    /// - [`OptionsError::UnavailableOptionValue`] if `value` is out of stock
    ///   and not already chosen.
    pub fn select(
        &mut self,
        group: &str,
        value: &str,
    ) -> Result<Option<SelectionChange>, OptionsError> {
        let target = self
            .groups
            .iter()
            .find(|g| g.name == group)
            .ok_or_else(|| OptionsError::UnknownSelectionTarget {
                name: group.to_owned(),
            })?;

        if !target.contains(value) {
            return Err(OptionsError::UnknownOptionValue {
                group: group.to_owned(),
                value: value.to_owned(),
            });
        }
        if self.selection.get(group) == Some(value) {
            return Ok(None);
        }
        if !target.is_selectable(value) {
            return Err(OptionsError::UnavailableOptionValue {
                group: group.to_owned(),
                value: value.to_owned(),
            });
        }

        if !self.selection.set_value(group, value)? {
            return Ok(None);
        }
        Ok(self.publish_if_changed())
    }

    /// Rebuilds groups from a fuller metafield set.
    ///
    /// Choices for groups present before and after are kept as long as the
    /// value is still a candidate in stock; other groups start at their
    /// default.
    pub fn reload(&mut self, metafields: &VariantMetafields) -> Option<SelectionChange> {
        let bundle = BundleDescriptor::from_metafield(metafields.bundled_variants.as_deref());
        let groups = groups_from_metafields(metafields);
        let selection =
            SelectionState::carry_over(&self.selection, &groups, self.settings.default_selection);

        tracing::debug!(
            before = self.groups.len(),
            after = groups.len(),
            "bundle option engine reloaded"
        );

        self.bundle = bundle;
        self.groups = groups;
        self.selection = selection;
        self.publish_if_changed()
    }

    /// Form fields the add-to-cart form posts: `properties[<group>]` per
    /// chosen value plus the encoded selection.
    #[must_use]
    pub fn hidden_fields(&self) -> Vec<HiddenField> {
        self.selection
            .chosen()
            .iter()
            .map(|(name, value)| HiddenField {
                name: format!("properties[{name}]"),
                value: value.clone(),
            })
            .chain(std::iter::once(HiddenField {
                name: BUNDLE_SELECTION_KEY.to_owned(),
                value: self.last_encoded.clone(),
            }))
            .collect()
    }

    /// Cart line for `merchandise_id` carrying the current selection.
    #[must_use]
    pub fn line_item(&self, merchandise_id: &str, quantity: Option<u32>) -> LineItemRequest {
        build_line_item(
            merchandise_id,
            quantity,
            self.selection.chosen(),
            &self.last_encoded,
        )
    }

    fn publish_if_changed(&mut self) -> Option<SelectionChange> {
        let encoded = self.encoded();
        if encoded == self.last_encoded {
            return None;
        }
        self.last_encoded.clone_from(&encoded);
        self.published = true;
        Some(self.snapshot(encoded))
    }

    fn snapshot(&self, encoded: String) -> SelectionChange {
        SelectionChange {
            encoded,
            chosen: self.selection.chosen().clone(),
        }
    }
}
