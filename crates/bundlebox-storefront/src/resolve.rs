//! Which variant the product page shows.

use bundlebox_core::{ProductView, SelectedOption, VariantView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantResolution {
    /// Render this variant.
    Selected(VariantView),
    /// The requested options matched no variant; the host should redirect
    /// to the first variant's options.
    RedirectToFirstVariant {
        selected_options: Vec<SelectedOption>,
    },
    /// The product has no variants at all.
    NoVariants,
}

/// Picks the variant to render.
///
/// Option-less products (first variant is `Title = Default Title`) always
/// render their only variant, whatever options were requested.
#[must_use]
pub fn resolve_variant(product: &ProductView) -> VariantResolution {
    let Some(first) = &product.first_variant else {
        return VariantResolution::NoVariants;
    };

    if first.is_default_title() {
        return VariantResolution::Selected(first.clone());
    }

    match &product.selected_variant {
        Some(selected) => VariantResolution::Selected(selected.clone()),
        None => {
            tracing::debug!(
                handle = %product.handle,
                "no variant matches the requested options, redirecting to first variant"
            );
            VariantResolution::RedirectToFirstVariant {
                selected_options: first.selected_options.clone(),
            }
        }
    }
}
