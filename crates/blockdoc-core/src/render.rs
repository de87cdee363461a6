//! Block and document HTML rendering

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::block::FeatureBlock;
use crate::config::RenderConfig;
use crate::document::Document;
use crate::error::Error;
use crate::registry::FeatureRegistry;

/// Per-render state shared by every block in a document
#[derive(Debug, Clone)]
pub struct RenderContext {
    debug: bool,
    error_class: String,
    prefetched: HashMap<String, HashMap<String, Value>>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            debug: config.debug,
            error_class: config.error_class.clone(),
            prefetched: HashMap::new(),
        }
    }

    /// Emit inline error markers for blocks that fail to render
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Store data a feature loaded ahead of rendering
    pub fn store(&mut self, feature: &str, key: impl Into<String>, value: Value) {
        self.prefetched
            .entry(feature.to_string())
            .or_default()
            .insert(key.into(), value);
    }

    pub fn lookup(&self, feature: &str, key: &str) -> Option<&Value> {
        self.prefetched.get(feature)?.get(key)
    }

    fn error_marker(&self, block: &dyn FeatureBlock, error: &Error) -> String {
        format!(
            "<div class=\"{}\" data-block-id=\"{}\" data-block-type=\"{}\">{}</div>",
            html_escape::encode_double_quoted_attribute(&self.error_class),
            html_escape::encode_double_quoted_attribute(block.id()),
            html_escape::encode_double_quoted_attribute(block.block_type()),
            html_escape::encode_text(&error.to_string()),
        )
    }
}

/// Outcome of rendering one block: whatever HTML was produced, plus the
/// error if rendering failed.
#[derive(Debug)]
pub struct BlockRender {
    pub html: String,
    pub error: Option<Error>,
}

impl BlockRender {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> crate::Result<String> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.html),
        }
    }
}

/// Render a single block without recovering from failure.
///
/// Partial output from a failed render is discarded.
pub fn render_block(block: &dyn FeatureBlock, ctx: &RenderContext) -> BlockRender {
    let mut html = String::new();
    match block.render(ctx, &mut html) {
        Ok(()) => BlockRender { html, error: None },
        Err(error) => BlockRender {
            html: String::new(),
            error: Some(error),
        },
    }
}

/// Render every block of `doc`, one fragment per block, in block order.
///
/// Runs prefetching tools first, recovers from individual block failures
/// (error marker in debug mode, empty fragment otherwise), then lets the
/// document's inline features rewrite all fragments in one pass.
pub fn render_fragments(
    doc: &Document,
    registry: &FeatureRegistry,
    ctx: &RenderContext,
) -> Vec<String> {
    let scope = registry.scope(doc.features());
    let mut ctx = ctx.clone();

    for reg in scope.iter() {
        let Some(prefetch) = reg.prefetch() else {
            continue;
        };
        let blocks: Vec<&dyn FeatureBlock> = doc
            .iter()
            .filter(|block| block.feature() == reg.name())
            .collect();
        if blocks.is_empty() {
            continue;
        }
        if let Err(error) = prefetch.prefetch(&blocks, &mut ctx) {
            warn!(feature = %reg.name(), %error, "prefetch failed, rendering without it");
        }
    }

    let mut fragments: Vec<String> = doc
        .iter()
        .map(|block| {
            let rendered = render_block(block, &ctx);
            match rendered.error {
                None => rendered.html,
                Some(error) => {
                    warn!(
                        block_id = %block.id(),
                        block_type = %block.block_type(),
                        %error,
                        "block failed to render"
                    );
                    if ctx.debug() {
                        ctx.error_marker(block, &error)
                    } else {
                        String::new()
                    }
                }
            }
        })
        .collect();

    for reg in scope.iter() {
        let Some(inline) = reg.as_inline() else {
            continue;
        };
        if let Err(error) = inline.rewrite(&ctx, &mut fragments) {
            warn!(feature = %reg.name(), %error, "inline rewrite failed");
        }
    }

    fragments
}

/// Render a whole document. Never fails because of a single block.
pub fn render_document(doc: &Document, registry: &FeatureRegistry, ctx: &RenderContext) -> String {
    render_fragments(doc, registry, ctx).concat()
}
