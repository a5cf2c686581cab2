//! Product-level variant picker state.
//!
//! Separate from bundle options: these are the product's own option axes
//! (`Size`, `Color`) that pick which variant is bought.

use serde::Serialize;

use crate::products::{ProductOption, VariantView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerValue {
    pub value: String,
    /// Some variant for sale carries this value together with the other
    /// currently selected options.
    pub available: bool,
    /// The selected variant carries this value.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub name: String,
    pub values: Vec<PickerValue>,
}

/// Builds the variant picker for `options`.
///
/// Options with a single value are left out. With no variant list loaded
/// yet every value counts as available.
#[must_use]
pub fn variant_picker(
    options: &[ProductOption],
    variants: &[VariantView],
    selected: Option<&VariantView>,
) -> Vec<PickerOption> {
    options
        .iter()
        .filter(|option| option.values.len() > 1)
        .map(|option| PickerOption {
            name: option.name.clone(),
            values: option
                .values
                .iter()
                .map(|value| PickerValue {
                    value: value.clone(),
                    available: variants.is_empty()
                        || variants.iter().any(|variant| {
                            variant.available_for_sale
                                && matches_with(variant, selected, &option.name, value)
                        }),
                    active: option_value(selected, &option.name) == Some(value.as_str()),
                })
                .collect(),
        })
        .collect()
}

/// `variant` carries `name = value` and agrees with `selected` on every
/// other option.
fn matches_with(
    variant: &VariantView,
    selected: Option<&VariantView>,
    name: &str,
    value: &str,
) -> bool {
    variant.selected_options.iter().all(|o| {
        if o.name == name {
            return o.value == value;
        }
        option_value(selected, &o.name).is_none_or(|current| current == o.value)
    })
}

fn option_value<'a>(variant: Option<&'a VariantView>, name: &str) -> Option<&'a str> {
    variant.and_then(|v| {
        v.selected_options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    })
}
