//! Error types for blockdoc-diff

/// Result type for blockdoc-diff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised around the diff engine.
///
/// Diffing two documents never fails; these come from the comparison
/// dispatcher and from the core crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] blockdoc_core::Error),

    #[error("Cannot compare a {old} value with a {new} value")]
    TypeMismatch {
        old: &'static str,
        new: &'static str,
    },
}
