use serde::{Deserialize, Serialize};

/// Variant title Shopify assigns to products with no real options.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// A decimal amount with its currency, exactly as the Storefront API
/// returns it (e.g. `{"amount": "12.99", "currencyCode": "USD"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

/// One `name=value` pair identifying a variant, e.g. `Size=Medium`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A product-level option axis with all its values, e.g. `Size: [S, M, L]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    pub values: Vec<String>,
}

/// Raw metafield strings attached to a variant by the bundle app.
///
/// Values are kept as the untrusted JSON text the store returned; decoding
/// happens in the option engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantMetafields {
    pub bundled_variants: Option<String>,
    pub variant_options: Option<String>,
    pub variant_options_v2: Option<String>,
}

impl VariantMetafields {
    /// Returns `true` when none of the bundle metafields is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundled_variants.is_none()
            && self.variant_options.is_none()
            && self.variant_options_v2.is_none()
    }
}

/// A purchasable variant as the product page sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantView {
    /// Storefront global ID, e.g. `"gid://shopify/ProductVariant/42"`.
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub price: Money,
    /// Pre-sale comparison price; `None` when the variant is not on sale.
    pub compare_at_price: Option<Money>,
    pub selected_options: Vec<SelectedOption>,
    pub metafields: VariantMetafields,
}

impl VariantView {
    /// Returns `true` for the placeholder variant of an option-less product.
    #[must_use]
    pub fn is_default_title(&self) -> bool {
        self.selected_options
            .iter()
            .any(|o| o.name == "Title" && o.value == DEFAULT_VARIANT_TITLE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub vendor: Option<String>,
    pub description_html: Option<String>,
    pub options: Vec<ProductOption>,
    /// Variant matching the requested selected options, if any matched.
    pub selected_variant: Option<VariantView>,
    /// The first variant of the product (the query only asks for one).
    pub first_variant: Option<VariantView>,
}

/// How the price block of the page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceDisplay {
    Sale { price: Money, compare_at: Money },
    Regular { price: Money },
    Unpriced,
}

impl PriceDisplay {
    #[must_use]
    pub fn for_variant(variant: Option<&VariantView>) -> Self {
        match variant {
            None => Self::Unpriced,
            Some(v) => match &v.compare_at_price {
                Some(compare_at) => Self::Sale {
                    price: v.price.clone(),
                    compare_at: compare_at.clone(),
                },
                None => Self::Regular {
                    price: v.price.clone(),
                },
            },
        }
    }
}

/// State of the add-to-cart control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCartState {
    pub disabled: bool,
    pub label: &'static str,
}

impl AddToCartState {
    #[must_use]
    pub fn for_variant(variant: Option<&VariantView>) -> Self {
        let available = variant.is_some_and(|v| v.available_for_sale);
        Self {
            disabled: !available,
            label: if available { "Add to cart" } else { "Sold out" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn make_variant(available: bool, compare_at: Option<&str>) -> VariantView {
        VariantView {
            id: "gid://shopify/ProductVariant/1".to_string(),
            title: "Medium".to_string(),
            sku: None,
            available_for_sale: available,
            price: usd("24.00"),
            compare_at_price: compare_at.map(usd),
            selected_options: vec![SelectedOption {
                name: "Size".to_string(),
                value: "Medium".to_string(),
            }],
            metafields: VariantMetafields::default(),
        }
    }

    #[test]
    fn price_display_sale_when_compare_at_set() {
        let variant = make_variant(true, Some("30.00"));
        assert_eq!(
            PriceDisplay::for_variant(Some(&variant)),
            PriceDisplay::Sale {
                price: usd("24.00"),
                compare_at: usd("30.00"),
            }
        );
    }

    #[test]
    fn price_display_regular_without_compare_at() {
        let variant = make_variant(true, None);
        assert_eq!(
            PriceDisplay::for_variant(Some(&variant)),
            PriceDisplay::Regular {
                price: usd("24.00")
            }
        );
    }

    #[test]
    fn price_display_unpriced_without_variant() {
        assert_eq!(PriceDisplay::for_variant(None), PriceDisplay::Unpriced);
    }

    #[test]
    fn add_to_cart_enabled_for_available_variant() {
        let variant = make_variant(true, None);
        let state = AddToCartState::for_variant(Some(&variant));
        assert!(!state.disabled);
        assert_eq!(state.label, "Add to cart");
    }

    #[test]
    fn add_to_cart_sold_out_for_unavailable_variant() {
        let variant = make_variant(false, None);
        let state = AddToCartState::for_variant(Some(&variant));
        assert!(state.disabled);
        assert_eq!(state.label, "Sold out");
    }

    #[test]
    fn add_to_cart_disabled_without_variant() {
        let state = AddToCartState::for_variant(None);
        assert!(state.disabled);
        assert_eq!(state.label, "Sold out");
    }

    #[test]
    fn default_title_variant_detected() {
        let mut variant = make_variant(true, None);
        assert!(!variant.is_default_title());
        variant.selected_options = vec![SelectedOption {
            name: "Title".to_string(),
            value: "Default Title".to_string(),
        }];
        assert!(variant.is_default_title());
    }

    #[test]
    fn metafields_empty_only_when_all_unset() {
        let mut metafields = VariantMetafields::default();
        assert!(metafields.is_empty());
        metafields.variant_options = Some("[]".to_string());
        assert!(!metafields.is_empty());
    }

    #[test]
    fn money_serializes_camel_case() {
        let json = serde_json::to_value(usd("1.00")).expect("serialization failed");
        assert_eq!(json["currencyCode"], "USD");
        assert_eq!(json["amount"], "1.00");
    }
}
