//! Form and storage contract for document-valued fields

use std::sync::Arc;

use tracing::debug;

use crate::config::EngineConfig;
use crate::document::{Document, DocumentData};
use crate::error::{Error, Result};
use crate::registry::FeatureRegistry;

/// A raw column value handed over by the persistence layer
#[derive(Debug, Clone, PartialEq)]
pub enum StorageValue {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl StorageValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
        }
    }
}

/// A document bound to a registry and an active feature set, exposing the
/// hooks form handling and persistence need.
#[derive(Debug)]
pub struct DocumentField {
    registry: Arc<FeatureRegistry>,
    features: Vec<String>,
    value: Option<Document>,
}

impl DocumentField {
    pub fn new<S: AsRef<str>>(registry: Arc<FeatureRegistry>, features: &[S]) -> Self {
        Self {
            registry,
            features: features.iter().map(|f| f.as_ref().to_string()).collect(),
            value: None,
        }
    }

    /// Use the active feature list from configuration
    pub fn from_config(registry: Arc<FeatureRegistry>, config: &EngineConfig) -> Self {
        Self::new(registry, &config.features.active)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    /// Turn submitted form JSON into a document. Blank input means no value.
    pub fn clean(&self, raw: &str) -> Result<Option<Document>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Document::from_json(&self.registry, &self.features, raw).map(Some)
    }

    /// Re-run every surviving block through its feature's validator
    pub fn validate(&self, doc: &Document) -> Result<()> {
        let scope = self.registry.scope(&self.features);
        for block in doc.encode(&self.registry).blocks {
            if let Some(reg) = scope.get(&block.block_type) {
                reg.validate(&block)?;
            }
        }
        Ok(())
    }

    pub fn value(&self) -> Option<&Document> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut Document> {
        self.value.as_mut()
    }

    pub fn set_value(&mut self, value: Option<Document>) {
        self.value = value;
    }

    pub fn take_value(&mut self) -> Option<Document> {
        self.value.take()
    }

    /// Load the field from a stored column value
    pub fn scan(&mut self, source: StorageValue) -> Result<()> {
        let text = match source {
            StorageValue::Null => {
                self.value = None;
                return Ok(());
            }
            StorageValue::Text(text) => text,
            StorageValue::Bytes(bytes) => String::from_utf8(bytes)
                .map_err(|_| Error::UnsupportedStorageType { kind: "non-UTF-8 bytes" })?,
            other => {
                return Err(Error::UnsupportedStorageType { kind: other.kind() });
            }
        };

        if text.trim().is_empty() {
            debug!("empty stored document, leaving field unset");
            self.value = None;
            return Ok(());
        }

        let data = DocumentData::from_json(&text)?;
        self.value = Some(Document::decode(&self.registry, &self.features, data)?);
        Ok(())
    }

    /// Marshal the current value for storage; `None` stores as null
    pub fn to_storage(&self) -> Result<Option<String>> {
        self.value
            .as_ref()
            .map(|doc| doc.to_json(&self.registry))
            .transpose()
    }
}
