//! Built-in block tunes

use blockdoc_core::BlockData;

pub mod alignment;
pub mod text_variant;

pub use alignment::Alignment;
pub use text_variant::{TextVariant, Variant};

/// Tune setting stored either under `key` or, for scalar payloads, under
/// `value`.
fn setting<'a>(data: &'a BlockData, key: &str) -> Option<&'a str> {
    data.str_field(key).or_else(|| data.str_field("value"))
}
