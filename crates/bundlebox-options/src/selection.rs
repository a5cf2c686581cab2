//! The shopper's current choice per option group and its canonical encoding.

use indexmap::IndexMap;
use serde::Serialize;

use bundlebox_core::{DefaultSelection, JoinMode};

use crate::error::OptionsError;
use crate::groups::OptionGroup;

/// Joins sub-options of the same section.
pub const SIBLING_SEPARATOR: &str = " ++ ";

/// Joins sections (or every group, in flat mode).
pub const GROUP_SEPARATOR: &str = " <> ";

/// Chosen value per option group, in group order.
///
/// Keys are fixed at initialization: [`SelectionState::set_value`] replaces
/// values but never adds or removes a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionState {
    chosen: IndexMap<String, String>,
}

impl SelectionState {
    /// One entry per group, holding the group's default value under `policy`.
    #[must_use]
    pub fn initialize(groups: &[OptionGroup], policy: DefaultSelection) -> Self {
        let chosen = groups
            .iter()
            .map(|g| {
                let value = g.default_value(policy).unwrap_or_default().to_owned();
                (g.name.clone(), value)
            })
            .collect();
        Self { chosen }
    }

    /// One entry per group, keeping `previous`'s value where the group still
    /// offers it in stock and falling back to the `policy` default otherwise.
    #[must_use]
    pub fn carry_over(
        previous: &SelectionState,
        groups: &[OptionGroup],
        policy: DefaultSelection,
    ) -> Self {
        let chosen = groups
            .iter()
            .map(|g| {
                let value = previous
                    .get(&g.name)
                    .filter(|v| g.is_selectable(v))
                    .or_else(|| g.default_value(policy))
                    .unwrap_or_default()
                    .to_owned();
                (g.name.clone(), value)
            })
            .collect();
        Self { chosen }
    }

    /// Replaces the value of an existing group.
    ///
    /// `value` is stored as given; candidate and stock checks belong to
    /// [`crate::BundleOptionEngine::select`]. Returns `Ok(true)` when the stored value changed.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownSelectionTarget`] when `name` is not a
    /// group of this selection.
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<bool, OptionsError> {
        let slot = self
            .chosen
            .get_mut(name)
            .ok_or_else(|| OptionsError::UnknownSelectionTarget {
                name: name.to_owned(),
            })?;
        if *slot == value {
            return Ok(false);
        }
        value.clone_into(slot);
        Ok(true)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.chosen.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn chosen(&self) -> &IndexMap<String, String> {
        &self.chosen
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Shorthand for [`encode`] on this state.
    #[must_use]
    pub fn encode(&self, groups: &[OptionGroup], mode: JoinMode) -> String {
        encode(self, groups, mode)
    }
}

/// Encodes `state` into the string submitted with the cart line.
///
/// Groups are visited in order; a group with no chosen value contributes an
/// empty string. In [`JoinMode::Nested`] consecutive groups of the same
/// section are joined with [`SIBLING_SEPARATOR`] first.
#[must_use]
pub fn encode(state: &SelectionState, groups: &[OptionGroup], mode: JoinMode) -> String {
    let value_of = |g: &OptionGroup| state.get(&g.name).unwrap_or_default();

    match mode {
        JoinMode::Flat => groups
            .iter()
            .map(value_of)
            .collect::<Vec<_>>()
            .join(GROUP_SEPARATOR),
        JoinMode::Nested => {
            let mut sections: Vec<(usize, Vec<&str>)> = Vec::new();
            for group in groups {
                match sections.last_mut() {
                    Some((section, values)) if *section == group.section => {
                        values.push(value_of(group));
                    }
                    _ => sections.push((group.section, vec![value_of(group)])),
                }
            }
            sections
                .into_iter()
                .map(|(_, values)| values.join(SIBLING_SEPARATOR))
                .collect::<Vec<_>>()
                .join(GROUP_SEPARATOR)
        }
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
