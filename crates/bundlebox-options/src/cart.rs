//! Cart line construction from a variant and the option selection.
//!
//! The output is shaped like the Storefront API's `CartLineInput`, so the
//! submission layer can send it as-is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use bundlebox_core::VariantView;

/// Attribute key carrying the encoded selection.
pub const BUNDLE_SELECTION_KEY: &str = "_bundle_selection";

const DEFAULT_QUANTITY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub merchandise_id: String,
    pub quantity: u32,
    /// Absent (not empty) for products without bundle options; the cart
    /// uses its presence to tell bundle lines apart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
}

/// Builds the line item for one variant.
///
/// Attributes are attached when either `chosen` or `encoded` is non-empty:
/// one per chosen entry, in order, followed by [`BUNDLE_SELECTION_KEY`].
#[must_use]
pub fn build_line_item(
    merchandise_id: &str,
    quantity: Option<u32>,
    chosen: &IndexMap<String, String>,
    encoded: &str,
) -> LineItemRequest {
    let attributes = (!chosen.is_empty() || !encoded.is_empty()).then(|| {
        chosen
            .iter()
            .map(|(key, value)| Attribute {
                key: key.clone(),
                value: value.clone(),
            })
            .chain(std::iter::once(Attribute {
                key: BUNDLE_SELECTION_KEY.to_owned(),
                value: encoded.to_owned(),
            }))
            .collect()
    });

    LineItemRequest {
        merchandise_id: merchandise_id.to_owned(),
        quantity: quantity.unwrap_or(DEFAULT_QUANTITY),
        attributes,
    }
}

/// Lines the add-to-cart form submits: one for the selected variant, none
/// when no variant is selected.
#[must_use]
pub fn lines_for_variant(
    variant: Option<&VariantView>,
    quantity: Option<u32>,
    chosen: &IndexMap<String, String>,
    encoded: &str,
) -> Vec<LineItemRequest> {
    variant
        .map(|v| build_line_item(&v.id, quantity, chosen, encoded))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlebox_core::{Money, VariantMetafields};

    fn chosen(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn plain_product_has_no_attributes_field() {
        let line = build_line_item("gid://1", Some(1), &IndexMap::new(), "");
        assert_eq!(line.merchandise_id, "gid://1");
        assert_eq!(line.quantity, 1);
        assert!(line.attributes.is_none());

        let json = serde_json::to_value(&line).expect("serialization failed");
        assert_eq!(
            json,
            serde_json::json!({"merchandiseId": "gid://1", "quantity": 1})
        );
    }

    #[test]
    fn bundle_selection_appends_reserved_attribute() {
        let line = build_line_item("gid://1", Some(1), &chosen(&[("Size", "Medium")]), "Medium");
        assert_eq!(
            line.attributes,
            Some(vec![
                Attribute {
                    key: "Size".to_owned(),
                    value: "Medium".to_owned(),
                },
                Attribute {
                    key: "_bundle_selection".to_owned(),
                    value: "Medium".to_owned(),
                },
            ])
        );
    }

    #[test]
    fn attributes_follow_selection_order() {
        let line = build_line_item(
            "gid://1",
            None,
            &chosen(&[("Color", "Red"), ("Size", "Medium")]),
            "Red <> Medium",
        );
        let keys: Vec<_> = line
            .attributes
            .expect("expected attributes")
            .into_iter()
            .map(|a| a.key)
            .collect();
        assert_eq!(keys, vec!["Color", "Size", "_bundle_selection"]);
    }

    #[test]
    fn quantity_defaults_to_one() {
        let line = build_line_item("gid://1", None, &IndexMap::new(), "");
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn encoded_alone_still_attaches_attributes() {
        let line = build_line_item("gid://1", Some(3), &IndexMap::new(), "Red");
        assert_eq!(line.quantity, 3);
        assert_eq!(line.attributes.map(|a| a.len()), Some(1));
    }

    #[test]
    fn no_lines_without_selected_variant() {
        assert!(lines_for_variant(None, None, &IndexMap::new(), "").is_empty());
    }

    #[test]
    fn one_line_for_selected_variant() {
        let variant = VariantView {
            id: "gid://shopify/ProductVariant/7".to_owned(),
            title: "Default Title".to_owned(),
            sku: None,
            available_for_sale: true,
            price: Money {
                amount: "10.00".to_owned(),
                currency_code: "USD".to_owned(),
            },
            compare_at_price: None,
            selected_options: Vec::new(),
            metafields: VariantMetafields::default(),
        };
        let lines = lines_for_variant(Some(&variant), None, &IndexMap::new(), "");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].merchandise_id, "gid://shopify/ProductVariant/7");
    }
}
