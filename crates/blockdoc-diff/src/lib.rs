//! Revision diff engine for block documents
//!
//! Turns two revisions of a [`blockdoc_core::Document`] into an HTML
//! fragment for reviewers:
//!
//! 1. every block is rendered and reduced to plain text
//! 2. blocks are aligned on identity keys (id, else `type#index`) with an
//!    LCS edit script
//! 3. aligned blocks whose text differs get an inline word or character
//!    diff; unmatched blocks are wrapped as removed or added
//!
//! ```ignore
//! use blockdoc_diff::Differ;
//!
//! let html = Differ::new(&registry).diff(&old, &new);
//! ```

pub mod compare;
pub mod engine;
pub mod error;
pub mod lcs;
pub mod normalize;
pub mod text;

pub use compare::{CompareDispatcher, DocumentComparer, FieldComparer, register};
pub use engine::{BlockChange, DiffOptions, Differ};
pub use error::{Error, Result};
pub use lcs::{EditOp, edit_script};
pub use normalize::{identity_key, normalize_html, placeholder};
pub use text::{Granularity, inline_diff};
