pub mod app_config;
pub mod config;
pub mod picker;
pub mod products;
pub mod settings;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    AddToCartState, Money, PriceDisplay, ProductOption, ProductView, SelectedOption,
    VariantMetafields, VariantView,
};
pub use picker::{variant_picker, PickerOption, PickerValue};
pub use settings::{BundleSettings, DefaultSelection, JoinMode, MetafieldKey};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
