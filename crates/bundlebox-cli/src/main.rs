mod online;
mod page;
mod select;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bundlebox_core::{AppConfig, VariantMetafields};
use bundlebox_options::BundleOptionEngine;

use crate::select::parse_selection;

#[derive(Debug, Parser)]
#[command(name = "bundlebox")]
#[command(about = "Bundle option derivation for Shopify product pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Derive option groups and the cart line from raw metafield JSON
    Inspect {
        /// `bundled_variants` metafield value
        #[arg(long)]
        bundled: Option<String>,

        /// `variant_options` metafield value
        #[arg(long)]
        options: Option<String>,

        /// `variant_options_v2` metafield value
        #[arg(long = "options-v2")]
        options_v2: Option<String>,

        /// Bundle option choice as `NAME=VALUE`; repeatable, applied in order
        #[arg(long = "select", value_parser = parse_selection)]
        select: Vec<(String, String)>,

        /// Variant ID to build the cart line for
        #[arg(long)]
        merchandise_id: Option<String>,

        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Fetch a product and render its page state
    Show {
        handle: String,

        /// Product page URL whose query string selects the variant
        #[arg(long)]
        url: Option<String>,

        /// Bundle option choice as `NAME=VALUE`; repeatable, applied in order
        #[arg(long = "select", value_parser = parse_selection)]
        select: Vec<(String, String)>,
    },
    /// Build the cart line for a product and optionally submit it
    Cart {
        handle: String,

        /// Product page URL whose query string selects the variant
        #[arg(long)]
        url: Option<String>,

        /// Bundle option choice as `NAME=VALUE`; repeatable, applied in order
        #[arg(long = "select", value_parser = parse_selection)]
        select: Vec<(String, String)>,

        #[arg(long)]
        quantity: Option<u32>,

        /// Send the line to the Storefront cart API instead of printing it
        #[arg(long)]
        submit: bool,

        /// Add to this cart instead of creating a new one
        #[arg(long, requires = "submit")]
        cart_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bundlebox_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Inspect {
            bundled,
            options,
            options_v2,
            select,
            merchandise_id,
            quantity,
        } => {
            let metafields = VariantMetafields {
                bundled_variants: bundled,
                variant_options: options,
                variant_options_v2: options_v2,
            };
            run_inspect(&config, &metafields, &select, merchandise_id.as_deref(), quantity)?;
        }
        Commands::Show {
            handle,
            url,
            select,
        } => online::run_show(&config, &handle, url.as_deref(), &select).await?,
        Commands::Cart {
            handle,
            url,
            select,
            quantity,
            submit,
            cart_id,
        } => {
            let request = online::CartRequest {
                handle: &handle,
                url: url.as_deref(),
                select: &select,
                quantity,
                submit,
                cart_id: cart_id.as_deref(),
            };
            online::run_cart(&config, &request).await?;
        }
    }

    Ok(())
}

fn run_inspect(
    config: &AppConfig,
    metafields: &VariantMetafields,
    select: &[(String, String)],
    merchandise_id: Option<&str>,
    quantity: Option<u32>,
) -> anyhow::Result<()> {
    let mut engine = BundleOptionEngine::new(metafields, config.bundle.clone());
    let emissions = page::apply_selections(&mut engine, select)?;
    let mut view = page::build_page(&engine, None, None, &[], quantity);
    view.emissions = emissions;
    if let Some(id) = merchandise_id {
        view.lines = vec![engine.line_item(id, quantity)];
    }
    page::print_json(&view)
}
