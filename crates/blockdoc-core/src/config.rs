//! Engine configuration
//!
//! Loaded from TOML; every section and field is optional:
//!
//! ```toml
//! [render]
//! debug = true
//!
//! [diff]
//! max_cells = 250000
//! word_level = true
//!
//! [features]
//! active = ["paragraph", "header"]
//!
//! [log]
//! filter = "warn,blockdoc_core=debug"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub diff: DiffConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Load `path`, or use defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        if self.diff.max_cells == 0 {
            return Err(Error::Config("diff.max_cells must be greater than zero".into()));
        }
        if self.render.error_class.trim().is_empty() {
            return Err(Error::Config("render.error_class must not be empty".into()));
        }
        crate::logging::directive_filter(&self.log.filter)?;
        Ok(())
    }
}

/// Document rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Show an inline marker in place of blocks that fail to render
    #[serde(default)]
    pub debug: bool,
    /// CSS class of the inline error marker
    #[serde(default = "default_error_class")]
    pub error_class: String,
}

fn default_error_class() -> String {
    "block-error".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            debug: false,
            error_class: default_error_class(),
        }
    }
}

/// Revision diff options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// LCS table size (old blocks x new blocks) above which a warning is logged
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
    /// Diff modified blocks word by word instead of character by character
    #[serde(default = "default_word_level")]
    pub word_level: bool,
}

fn default_max_cells() -> usize {
    250_000
}

fn default_word_level() -> bool {
    true
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_cells: default_max_cells(),
            word_level: default_word_level(),
        }
    }
}

/// Feature selection for document fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Active feature names; empty means every registered feature
    #[serde(default)]
    pub active: Vec<String>,
}

/// Subscriber options used by [`crate::logging::init`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Include file and line of each event
    #[serde(default)]
    pub source_location: bool,
}

fn default_log_filter() -> String {
    "warn,blockdoc_core=info,blockdoc_diff=info,blockdoc_features=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            source_location: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_source_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(!config.render.debug);
        assert_eq!(config.render.error_class, "block-error");
        assert_eq!(config.diff.max_cells, 250_000);
        assert!(config.diff.word_level);
        assert!(config.features.active.is_empty());
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
[render]
debug = true

[features]
active = ["paragraph", "header"]
"#,
        )
        .unwrap();

        assert!(config.render.debug);
        assert_eq!(config.render.error_class, "block-error");
        assert_eq!(config.features.active, vec!["paragraph", "header"]);
        assert_eq!(config.diff, DiffConfig::default());
    }

    #[test]
    fn zero_max_cells_is_rejected() {
        let err = EngineConfig::from_toml_str("[diff]\nmax_cells = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn log_filter_is_checked_on_load() {
        let config =
            EngineConfig::from_toml_str("[log]\nfilter = \"blockdoc_diff=trace\"\n").unwrap();
        assert_eq!(config.log.filter, "blockdoc_diff=trace");
        assert!(!config.log.source_location);

        let err = EngineConfig::from_toml_str("[log]\nfilter = \"blockdoc_diff=loud\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = EngineConfig::from_toml_str("[render\ndebug = true").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn load_or_default_handles_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_or_default(dir.path().join("blockdoc.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockdoc.toml");
        std::fs::write(&path, "[diff]\nword_level = false\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert!(!config.diff.word_level);
    }
}
