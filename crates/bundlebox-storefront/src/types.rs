//! Storefront API response types.
//!
//! ## Observed shape
//!
//! ### Envelope
//! Every response is `{"data": ..., "errors": [...]}`. `errors` is omitted on
//! success; on a query error `data` may still be present but partial, so any
//! error entry fails the call.
//!
//! ### Metafields
//! An unset metafield comes back as `null`, not as an object with an empty
//! value. `value` is always a string; for the bundle app it is JSON text.
//!
//! ### `compareAtPrice`
//! `null` when the variant is not on sale.
//!
//! ### `sku`
//! May be `null` or `""`; both are normalized to `None`.

use serde::{Deserialize, Serialize};

use bundlebox_core::{Money, ProductOption, SelectedOption};

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// `data` of the product and variants queries.
#[derive(Debug, Deserialize)]
pub struct ProductData<P> {
    pub product: Option<P>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontProduct {
    /// Global ID, e.g. `"gid://shopify/Product/1"`.
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub description_html: Option<String>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// `null` when no variant matches the requested selected options.
    #[serde(default)]
    pub selected_variant: Option<StorefrontVariant>,
    pub variants: VariantConnection,
}

/// `data.product` of the deferred variants query.
#[derive(Debug, Deserialize)]
pub struct ProductVariants {
    pub variants: VariantConnection,
}

#[derive(Debug, Deserialize)]
pub struct VariantConnection {
    pub nodes: Vec<StorefrontVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontVariant {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    #[serde(default)]
    pub bundled_variants: Option<Metafield>,
    #[serde(default)]
    pub variant_options: Option<Metafield>,
    #[serde(default, rename = "variantOptionsV2")]
    pub variant_options_v2: Option<Metafield>,
}

#[derive(Debug, Deserialize)]
pub struct Metafield {
    pub value: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: Option<CartPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    pub cart: Option<CartSummary>,
    #[serde(default)]
    pub user_errors: Vec<CartUserError>,
}

/// The cart after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CartUserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}
