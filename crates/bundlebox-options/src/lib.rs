pub mod bundle;
pub mod cart;
pub mod engine;
pub mod error;
pub mod groups;
pub mod metafield;
pub mod selection;
pub mod types;

pub use bundle::{BundleDescriptor, BundleKind, BundleLineItem};
pub use cart::{
    build_line_item, lines_for_variant, Attribute, LineItemRequest, BUNDLE_SELECTION_KEY,
};
pub use engine::{BundleOptionEngine, EngineState, HiddenField, SelectionChange};
pub use error::{MetafieldError, OptionsError};
pub use groups::{groups_from_metafields, OptionGroup, OptionSource, OptionValue};
pub use metafield::{decode_metafield, parse_metafield};
pub use selection::{encode, SelectionState};
