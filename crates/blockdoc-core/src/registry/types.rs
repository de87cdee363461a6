//! Core types for the feature registry

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::BlockData;
use crate::error::Result;
use crate::feature::{EditorContext, InlineFeature, Media, Prefetch, RouteRegistrar, Tool, Tune};

/// What a registered feature does, without its implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Constructs renderable blocks
    Tool,
    /// Decorates constructed blocks
    Tune,
    /// Rewrites rendered HTML in batch
    Inline,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tool => write!(f, "tool"),
            Self::Tune => write!(f, "tune"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

/// The implementation behind a registration, tagged by role
#[derive(Clone)]
pub enum Capability {
    Tool(Arc<dyn Tool>),
    Tune(Arc<dyn Tune>),
    Inline(Arc<dyn InlineFeature>),
}

impl Capability {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Tool(_) => FeatureKind::Tool,
            Self::Tune(_) => FeatureKind::Tune,
            Self::Inline(_) => FeatureKind::Inline,
        }
    }
}

/// A feature as stored in the registry.
///
/// Capabilities are resolved once here; callers branch on the tag instead
/// of probing the implementation on every use.
#[derive(Clone)]
pub struct FeatureRegistration {
    name: String,
    capability: Capability,
    prefetch: Option<Arc<dyn Prefetch>>,
}

impl FeatureRegistration {
    pub fn tool<T: Tool + 'static>(tool: T) -> Self {
        Self::from_tool(Arc::new(tool))
    }

    pub fn from_tool(tool: Arc<dyn Tool>) -> Self {
        Self {
            name: tool.name().to_string(),
            capability: Capability::Tool(tool),
            prefetch: None,
        }
    }

    /// Register a tool that also batch-loads data for its blocks
    pub fn prefetching_tool<T: Tool + Prefetch + 'static>(tool: T) -> Self {
        let tool = Arc::new(tool);
        let prefetch: Arc<dyn Prefetch> = tool.clone();
        let tool: Arc<dyn Tool> = tool;
        Self {
            name: tool.name().to_string(),
            capability: Capability::Tool(tool),
            prefetch: Some(prefetch),
        }
    }

    pub fn tune<T: Tune + 'static>(tune: T) -> Self {
        let tune: Arc<dyn Tune> = Arc::new(tune);
        Self {
            name: tune.name().to_string(),
            capability: Capability::Tune(tune),
            prefetch: None,
        }
    }

    pub fn inline<T: InlineFeature + 'static>(feature: T) -> Self {
        let feature: Arc<dyn InlineFeature> = Arc::new(feature);
        Self {
            name: feature.name().to_string(),
            capability: Capability::Inline(feature),
            prefetch: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FeatureKind {
        self.capability.kind()
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn as_tool(&self) -> Option<&Arc<dyn Tool>> {
        match &self.capability {
            Capability::Tool(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_tune(&self) -> Option<&Arc<dyn Tune>> {
        match &self.capability {
            Capability::Tune(tune) => Some(tune),
            _ => None,
        }
    }

    pub fn as_inline(&self) -> Option<&Arc<dyn InlineFeature>> {
        match &self.capability {
            Capability::Inline(feature) => Some(feature),
            _ => None,
        }
    }

    pub fn prefetch(&self) -> Option<&Arc<dyn Prefetch>> {
        self.prefetch.as_ref()
    }

    pub fn constructor(&self) -> &str {
        match &self.capability {
            Capability::Tool(f) => f.constructor(),
            Capability::Tune(f) => f.constructor(),
            Capability::Inline(f) => f.constructor(),
        }
    }

    pub fn config(&self, ctx: &EditorContext) -> Value {
        match &self.capability {
            Capability::Tool(f) => f.config(ctx),
            Capability::Tune(f) => f.config(ctx),
            Capability::Inline(f) => f.config(ctx),
        }
    }

    pub fn media(&self) -> Media {
        match &self.capability {
            Capability::Tool(f) => f.media(),
            Capability::Tune(f) => f.media(),
            Capability::Inline(f) => f.media(),
        }
    }

    pub fn validate(&self, data: &BlockData) -> Result<()> {
        match &self.capability {
            Capability::Tool(f) => f.validate(data),
            Capability::Tune(f) => f.validate(data),
            Capability::Inline(f) => f.validate(data),
        }
    }

    pub fn on_register(&self, router: &mut dyn RouteRegistrar) {
        match &self.capability {
            Capability::Tool(f) => f.on_register(router),
            Capability::Tune(f) => f.on_register(router),
            Capability::Inline(f) => f.on_register(router),
        }
    }
}

impl fmt::Debug for FeatureRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureRegistration")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("prefetch", &self.prefetch.is_some())
            .finish()
    }
}
