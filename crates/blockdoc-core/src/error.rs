//! Error types for blockdoc-core

/// Result type for blockdoc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding, rendering, or persisting documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A block or tune type is not registered. Decode and encode skip these
    /// silently; the variant exists for lookups that must report it.
    #[error("Unknown feature: {name}")]
    UnknownFeature { name: String },

    #[error("Invalid {feature} data: {message}")]
    Validation { feature: String, message: String },

    #[error("Feature {feature} is misconfigured: {message}")]
    Structural { feature: String, message: String },

    #[error("Failed to render {block_type} block: {message}")]
    Render { block_type: String, message: String },

    #[error("Cannot scan {kind} into a document field")]
    UnsupportedStorageType { kind: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error")]
    Fmt(#[from] std::fmt::Error),
}

impl Error {
    pub fn validation(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            feature: feature.into(),
            message: message.into(),
        }
    }

    pub fn structural(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structural {
            feature: feature.into(),
            message: message.into(),
        }
    }

    pub fn render(block_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            block_type: block_type.into(),
            message: message.into(),
        }
    }

    /// True for errors raised by a feature's validator
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_feature_and_message() {
        let err = Error::validation("header", "level must be between 1 and 6");
        let display = err.to_string();
        assert!(display.contains("header"), "got: {display}");
        assert!(display.contains("level must be between 1 and 6"), "got: {display}");
        assert!(err.is_validation());
    }

    #[test]
    fn structural_error_is_not_validation() {
        let err = Error::structural("alignment", "cannot render blocks");
        assert!(!err.is_validation());
        assert!(err.to_string().contains("misconfigured"));
    }

    #[test]
    fn storage_error_mentions_kind() {
        let err = Error::UnsupportedStorageType { kind: "integer" };
        assert_eq!(err.to_string(), "Cannot scan integer into a document field");
    }
}
