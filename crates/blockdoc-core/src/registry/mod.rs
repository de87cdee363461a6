//! Feature registry
//!
//! The registry is the catalogue every other component consults: decoding
//! resolves block and tune types through it, rendering and encoding scope
//! themselves to a document's active features through it, and the editor
//! manifest is built from it.

mod manifest;
mod store;
mod types;

pub use manifest::{EditorConfig, ToolConfig};
pub use store::{FeatureRegistry, FeatureScope};
pub use types::{Capability, FeatureKind, FeatureRegistration};
