//! Feature traits: the plugin contract for tools, tunes, and inline features

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::{BlockData, FeatureBlock};
use crate::error::Result;
use crate::render::RenderContext;

/// Request-scoped context handed to features when building editor config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorContext {
    /// Prefix for endpoints features expose (e.g. "/admin")
    pub base_url: String,
    pub locale: Option<String>,
    /// Host-supplied values features may read
    pub values: Map<String, Value>,
}

impl EditorContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Join a path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Ordered CSS/JS asset references a feature needs on the editing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default)]
    pub js: Vec<String>,
}

impl Media {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_css(mut self, path: impl Into<String>) -> Self {
        self.css.push(path.into());
        self
    }

    pub fn with_js(mut self, path: impl Into<String>) -> Self {
        self.js.push(path.into());
        self
    }

    /// Append another feature's assets, keeping first occurrence order
    pub fn merge(&mut self, other: &Media) {
        for css in &other.css {
            if !self.css.contains(css) {
                self.css.push(css.clone());
            }
        }
        for js in &other.js {
            if !self.js.contains(js) {
                self.js.push(js.clone());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.js.is_empty()
    }
}

/// Minimal route registration capability offered to features at start-up
pub trait RouteRegistrar {
    fn register_route(&mut self, method: &str, path: &str, name: &str);
}

/// Behaviour shared by every registered plugin
pub trait Feature: Send + Sync {
    /// Registry key and block/tune type identifier
    fn name(&self) -> &str;

    /// Client-side class identifier used by the editor
    fn constructor(&self) -> &str;

    fn config(&self, _ctx: &EditorContext) -> Value {
        Value::Object(Map::new())
    }

    fn media(&self) -> Media {
        Media::default()
    }

    fn validate(&self, _data: &BlockData) -> Result<()> {
        Ok(())
    }

    /// One-shot start-up hook.
    ///
    /// Hosts may call this more than once per process; implementations with
    /// side effects must guard them so they run at most once.
    fn on_register(&self, _router: &mut dyn RouteRegistrar) {}
}

/// A feature that constructs renderable blocks
pub trait Tool: Feature {
    /// Build the in-memory block. Pure construction, no I/O.
    fn render(&self, data: BlockData) -> Result<Box<dyn FeatureBlock>>;
}

/// A feature that decorates already-constructed blocks
pub trait Tune: Feature {
    /// Return the block unchanged, mutated, or wrapped.
    ///
    /// `data` is the tune payload presented through [`BlockData::for_tune`].
    fn tune(&self, block: Box<dyn FeatureBlock>, data: &BlockData)
    -> Result<Box<dyn FeatureBlock>>;
}

/// A feature that rewrites rendered HTML fragments in one batch
pub trait InlineFeature: Feature {
    fn rewrite(&self, ctx: &RenderContext, fragments: &mut [String]) -> Result<()>;
}

/// Optional tool capability: batch-load external data for all of a tool's
/// blocks before a document renders.
pub trait Prefetch: Send + Sync {
    fn prefetch(&self, blocks: &[&dyn FeatureBlock], ctx: &mut RenderContext) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_merge_preserves_order_and_deduplicates() {
        let mut media = Media::new().with_css("a.css").with_js("editor.js");
        media.merge(&Media::new().with_css("b.css").with_js("editor.js"));
        media.merge(&Media::new().with_css("a.css").with_js("header.js"));

        assert_eq!(media.css, vec!["a.css", "b.css"]);
        assert_eq!(media.js, vec!["editor.js", "header.js"]);
    }

    #[test]
    fn editor_context_joins_urls() {
        let ctx = EditorContext::new("/admin/");
        assert_eq!(ctx.url("/uploads/image"), "/admin/uploads/image");
        assert_eq!(EditorContext::default().url("x"), "/x");
    }
}
