//! Commands that talk to the Storefront API.

use serde::Serialize;

use bundlebox_core::{AppConfig, ProductView, VariantView};
use bundlebox_options::BundleOptionEngine;
use bundlebox_storefront::{
    resolve_variant, selected_options_from_url, CartSummary, StorefrontClient, StorefrontSettings,
    VariantResolution,
};

use crate::page::{self, PageView};

pub(crate) struct CartRequest<'a> {
    pub handle: &'a str,
    pub url: Option<&'a str>,
    pub select: &'a [(String, String)],
    pub quantity: Option<u32>,
    pub submit: bool,
    pub cart_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CartOutput<'a> {
    page: PageView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart: Option<CartSummary>,
}

fn build_client(config: &AppConfig) -> anyhow::Result<StorefrontClient> {
    let settings = StorefrontSettings::from_app_config(config)?;
    Ok(StorefrontClient::new(&settings)?)
}

/// Fetches the product and picks the variant the page renders.
///
/// A request whose options match no variant lands on the first variant,
/// as the page's redirect would.
async fn load_product(
    client: &StorefrontClient,
    handle: &str,
    url: Option<&str>,
) -> anyhow::Result<(ProductView, Option<VariantView>)> {
    let selected_options = url
        .map(selected_options_from_url)
        .transpose()?
        .unwrap_or_default();
    let product = client.fetch_product(handle, &selected_options).await?;

    let variant = match resolve_variant(&product) {
        VariantResolution::Selected(variant) => Some(variant),
        VariantResolution::RedirectToFirstVariant { selected_options } => {
            tracing::info!(
                handle,
                options = ?selected_options,
                "requested options match no variant, using first variant"
            );
            product.first_variant.clone()
        }
        VariantResolution::NoVariants => {
            tracing::warn!(handle, "product has no variants");
            None
        }
    };
    Ok((product, variant))
}

fn engine_for(config: &AppConfig, variant: Option<&VariantView>) -> BundleOptionEngine {
    let metafields = variant.map(|v| v.metafields.clone()).unwrap_or_default();
    BundleOptionEngine::new(&metafields, config.bundle.clone())
}

pub(crate) async fn run_show(
    config: &AppConfig,
    handle: &str,
    url: Option<&str>,
    select: &[(String, String)],
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let (product, variant) = load_product(&client, handle, url).await?;
    // Deferred query: only feeds the variant picker, so a failure degrades
    // to "everything available".
    let variants = match client.fetch_variants(handle).await {
        Ok(variants) => variants,
        Err(e) => {
            tracing::warn!(handle, error = %e, "variant list unavailable");
            Vec::new()
        }
    };

    let mut engine = engine_for(config, variant.as_ref());
    let emissions = page::apply_selections(&mut engine, select)?;
    let mut view = page::build_page(&engine, Some(&product), variant.as_ref(), &variants, None);
    view.emissions = emissions;
    page::print_json(&view)
}

pub(crate) async fn run_cart(config: &AppConfig, request: &CartRequest<'_>) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let (product, variant) = load_product(&client, request.handle, request.url).await?;

    let mut engine = engine_for(config, variant.as_ref());
    let emissions = page::apply_selections(&mut engine, request.select)?;
    let mut view = page::build_page(
        &engine,
        Some(&product),
        variant.as_ref(),
        &[],
        request.quantity,
    );
    view.emissions = emissions;

    let cart = if request.submit {
        if view.add_to_cart.disabled {
            anyhow::bail!(
                "product '{}' has no purchasable variant for the requested options",
                request.handle
            );
        }
        let cart = match request.cart_id {
            Some(cart_id) => client.cart_lines_add(cart_id, &view.lines).await?,
            None => client.cart_create(&view.lines).await?,
        };
        Some(cart)
    } else {
        None
    };

    page::print_json(&CartOutput { page: view, cart })
}
