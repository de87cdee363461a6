//! Document aggregate and its transport form

use serde::{Deserialize, Deserializer, Serialize};

use crate::block::{BlockData, FeatureBlock};
use crate::error::Result;
use crate::registry::FeatureRegistry;
use crate::render::{self, RenderContext};

/// Editor version stamped on documents built in code
pub const EDITOR_VERSION: &str = "2.30.7";

/// Transport JSON form of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub time: i64,
    #[serde(default, deserialize_with = "skip_null_blocks")]
    pub blocks: Vec<BlockData>,
    #[serde(default)]
    pub version: String,
}

impl DocumentData {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn skip_null_blocks<'de, D>(deserializer: D) -> std::result::Result<Vec<BlockData>, D::Error>
where
    D: Deserializer<'de>,
{
    let blocks: Option<Vec<Option<BlockData>>> = Option::deserialize(deserializer)?;
    Ok(blocks.unwrap_or_default().into_iter().flatten().collect())
}

/// Ordered blocks plus metadata and the feature set the document is
/// scoped to.
///
/// An empty feature list means every registered feature applies.
#[derive(Debug)]
pub struct Document {
    pub time: i64,
    pub version: String,
    blocks: Vec<Box<dyn FeatureBlock>>,
    features: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document stamped with the current time
    pub fn new() -> Self {
        Self {
            time: chrono::Utc::now().timestamp_millis(),
            version: EDITOR_VERSION.to_string(),
            blocks: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Create a stamped document holding `blocks`
    pub fn from_blocks(blocks: Vec<Box<dyn FeatureBlock>>) -> Self {
        Self {
            blocks,
            ..Self::new()
        }
    }

    /// Restrict the document to the named features
    pub fn with_features<S: AsRef<str>>(mut self, features: &[S]) -> Self {
        self.features = features.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    pub fn with_time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn push(&mut self, block: Box<dyn FeatureBlock>) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Box<dyn FeatureBlock>] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FeatureBlock> {
        self.blocks.iter().map(|block| {
            let block: &dyn FeatureBlock = block.as_ref();
            block
        })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Unmarshal transport JSON and decode it under `features`
    pub fn from_json<S: AsRef<str>>(
        registry: &FeatureRegistry,
        features: &[S],
        source: &str,
    ) -> Result<Self> {
        let data = DocumentData::from_json(source)?;
        Self::decode(registry, features, data)
    }

    /// Encode and marshal to transport JSON
    pub fn to_json(&self, registry: &FeatureRegistry) -> Result<String> {
        self.encode(registry).to_json()
    }

    /// Render the document's HTML; failing blocks never abort the whole page
    pub fn render(&self, registry: &FeatureRegistry, ctx: &RenderContext) -> String {
        render::render_document(self, registry, ctx)
    }

    /// Render one fragment per block, aligned with [`Document::blocks`]
    pub fn render_fragments(&self, registry: &FeatureRegistry, ctx: &RenderContext) -> Vec<String> {
        render::render_fragments(self, registry, ctx)
    }
}
