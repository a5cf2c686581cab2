//! Conversion from Storefront API shapes to [`bundlebox_core`] views.

use bundlebox_core::{ProductView, VariantMetafields, VariantView};

use crate::types::{Metafield, StorefrontProduct, StorefrontVariant};

/// Normalizes a product from the product query.
///
/// Only the first variant is kept; the query asks for no more.
#[must_use]
pub fn normalize_product(product: StorefrontProduct) -> ProductView {
    let first_variant = product
        .variants
        .nodes
        .into_iter()
        .next()
        .map(normalize_variant);

    ProductView {
        id: product.id,
        title: product.title,
        handle: product.handle,
        vendor: product.vendor.filter(|s| !s.is_empty()),
        description_html: product.description_html,
        options: product.options,
        selected_variant: product.selected_variant.map(normalize_variant),
        first_variant,
    }
}

#[must_use]
pub fn normalize_variant(variant: StorefrontVariant) -> VariantView {
    // Treat an empty SKU as absent.
    let sku = variant.sku.filter(|s| !s.is_empty());

    VariantView {
        id: variant.id,
        title: variant.title,
        sku,
        available_for_sale: variant.available_for_sale,
        price: variant.price,
        compare_at_price: variant.compare_at_price,
        selected_options: variant.selected_options,
        metafields: VariantMetafields {
            bundled_variants: metafield_value(variant.bundled_variants),
            variant_options: metafield_value(variant.variant_options),
            variant_options_v2: metafield_value(variant.variant_options_v2),
        },
    }
}

fn metafield_value(metafield: Option<Metafield>) -> Option<String> {
    metafield.map(|m| m.value).filter(|v| !v.is_empty())
}
