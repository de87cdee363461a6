//! Built-in features for blockdoc
//!
//! - **Tools**: `paragraph`, `header`, `list`, `quote`, `code`,
//!   `delimiter`, `image`
//! - **Tunes**: `alignment`, `text-variant`
//! - **Inline**: `links`, resolving `<a data-page-id>` anchors in one batch
//!
//! [`register_builtins`] registers the tools and tunes. The `links` feature
//! and image lookups need host services and are added with
//! [`register_links`] and [`register_image_source`].

pub mod builtins;
pub mod links;
pub mod tools;
pub mod tunes;

pub use builtins::{
    BUILTIN_COUNT, builtin_registrations, builtin_registry, register_builtins,
    register_image_source, register_links,
};
pub use links::{LinkResolver, Links, PageLink};
pub use tools::{Code, DataBlock, Delimiter, Header, ImageSource, ImageTool, List, Paragraph, Quote};
pub use tunes::{Alignment, TextVariant, Variant};
