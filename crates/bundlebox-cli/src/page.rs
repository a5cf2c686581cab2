//! JSON rendering of the product page state.

use serde::Serialize;

use bundlebox_core::{
    variant_picker, AddToCartState, PickerOption, PriceDisplay, ProductView, VariantView,
};
use bundlebox_options::{
    lines_for_variant, BundleKind, BundleLineItem, BundleOptionEngine, EngineState, HiddenField,
    LineItemRequest, OptionValue, SelectionChange, SelectionState,
};

#[derive(Debug, Serialize)]
pub(crate) struct ProductSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub handle: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BundleSummary {
    pub kind: BundleKind,
    /// "What's included" labels; absent for build-your-own bundles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GroupView<'a> {
    pub name: &'a str,
    pub section: usize,
    pub values: Vec<OptionValue<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PageView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary<'a>>,
    pub price: PriceDisplay,
    pub add_to_cart: AddToCartState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variant_picker: Vec<PickerOption>,
    pub bundle: BundleSummary,
    pub state: EngineState,
    pub options: Vec<GroupView<'a>>,
    pub selection: &'a SelectionState,
    pub encoded: String,
    pub emissions: Vec<SelectionChange>,
    pub hidden_fields: Vec<HiddenField>,
    pub lines: Vec<LineItemRequest>,
}

/// Applies `NAME=VALUE` choices in order and returns every emission,
/// starting with the initial one.
///
/// # Errors
///
/// Fails on the first choice naming an unknown group, an unknown value,
/// or an out-of-stock value.
pub(crate) fn apply_selections(
    engine: &mut BundleOptionEngine,
    select: &[(String, String)],
) -> anyhow::Result<Vec<SelectionChange>> {
    let mut emissions: Vec<SelectionChange> = engine.initial_emission().into_iter().collect();
    for (name, value) in select {
        if let Some(change) = engine.select(name, value)? {
            emissions.push(change);
        }
    }
    Ok(emissions)
}

pub(crate) fn build_page<'a>(
    engine: &'a BundleOptionEngine,
    product: Option<&'a ProductView>,
    variant: Option<&'a VariantView>,
    variants: &[VariantView],
    quantity: Option<u32>,
) -> PageView<'a> {
    let encoded = engine.encoded();
    let bundle = engine.bundle();

    PageView {
        product: product.map(|p| ProductSummary {
            id: &p.id,
            title: &p.title,
            handle: &p.handle,
            vendor: p.vendor.as_deref(),
            variant_id: variant.map(|v| v.id.as_str()),
        }),
        price: PriceDisplay::for_variant(variant),
        add_to_cart: AddToCartState::for_variant(variant),
        variant_picker: product
            .map(|p| variant_picker(&p.options, variants, variant))
            .unwrap_or_default(),
        bundle: BundleSummary {
            kind: bundle.kind,
            included: bundle
                .included_items()
                .map(|items| items.iter().map(BundleLineItem::label).collect()),
        },
        state: engine.state(),
        options: engine
            .groups()
            .iter()
            .map(|g| GroupView {
                name: &g.name,
                section: g.section,
                values: g.values(),
            })
            .collect(),
        selection: engine.selection(),
        lines: lines_for_variant(variant, quantity, engine.selection().chosen(), &encoded),
        encoded,
        emissions: Vec::new(),
        hidden_fields: engine.hidden_fields(),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
