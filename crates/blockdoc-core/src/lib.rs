//! Block-based rich content engine
//!
//! A document is an ordered sequence of typed blocks, each produced by a
//! registered plugin ("feature"). This crate provides:
//!
//! - **Feature registry**: ordered catalogue of tools, tunes, and inline
//!   features, plus the editor manifest built from it
//! - **Block model**: transport [`BlockData`] and the constructed
//!   [`FeatureBlock`] capability
//! - **Serialization**: [`Document::decode`] / [`Document::encode`] with
//!   soft-skip of unknown types and fail-fast validation
//! - **Rendering**: per-block HTML with local error recovery, prefetching,
//!   and batched inline rewriting
//! - **Field contract**: [`DocumentField`] for form and storage layers
//!
//! # Example
//!
//! ```ignore
//! use blockdoc_core::{Document, FeatureRegistry, RenderContext};
//!
//! let registry: FeatureRegistry = build_registry();
//! let doc = Document::from_json(&registry, &["paragraph"], source)?;
//! let html = doc.render(&registry, &RenderContext::new());
//! ```

pub mod block;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod feature;
pub mod field;
pub mod inline;
pub mod logging;
pub mod registry;
pub mod render;
pub mod tune;

pub use block::{BlockAttributes, BlockBase, BlockData, FeatureBlock, json_kind};
pub use config::{DiffConfig, EngineConfig, FeaturesConfig, LogConfig, RenderConfig};
pub use document::{Document, DocumentData, EDITOR_VERSION};
pub use error::{Error, Result};
pub use feature::{
    EditorContext, Feature, InlineFeature, Media, Prefetch, RouteRegistrar, Tool, Tune,
};
pub use field::{DocumentField, StorageValue};
pub use inline::{ElementAttributes, ElementRewriter};
pub use registry::{
    Capability, EditorConfig, FeatureKind, FeatureRegistration, FeatureRegistry, FeatureScope,
    ToolConfig,
};
pub use render::{BlockRender, RenderContext, render_block, render_document, render_fragments};
pub use tune::apply_tunes;
