pub mod client;
pub mod error;
pub mod normalize;
pub mod queries;
pub mod rate_limit;
pub mod resolve;
pub mod selected_options;
pub mod types;

pub use client::{StorefrontClient, StorefrontSettings};
pub use error::StorefrontError;
pub use normalize::{normalize_product, normalize_variant};
pub use resolve::{resolve_variant, VariantResolution};
pub use selected_options::{selected_options_from_query, selected_options_from_url};
pub use types::CartSummary;
