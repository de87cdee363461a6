//! Probe features with controllable validation and render failures

use std::fmt;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use blockdoc_core::{
    BlockBase, BlockData, Error, Feature, FeatureBlock, FeatureRegistration, FeatureRegistry,
    Media, RenderContext, Result, RouteRegistrar, Tool, Tune,
};
use serde_json::{Value, json};

/// Tool whose blocks render `<div data-probe="name">text</div>`.
///
/// `{"invalid": true}` fails validation; `{"explode": true}` fails rendering.
#[derive(Debug, Clone)]
pub struct ProbeTool {
    name: String,
}

impl ProbeTool {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Feature for ProbeTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn constructor(&self) -> &str {
        "ProbeTool"
    }

    fn config(&self, _ctx: &blockdoc_core::EditorContext) -> Value {
        json!({"probe": self.name})
    }

    fn media(&self) -> Media {
        Media::new().with_js(format!("probe/{}.js", self.name))
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        if data.flag("invalid") {
            return Err(Error::validation(&self.name, "probe marked invalid"));
        }
        Ok(())
    }
}

impl Tool for ProbeTool {
    fn render(&self, data: BlockData) -> Result<Box<dyn FeatureBlock>> {
        Ok(Box::new(ProbeBlock {
            base: BlockBase::new(&self.name, data),
        }))
    }
}

#[derive(Debug)]
pub struct ProbeBlock {
    base: BlockBase,
}

impl FeatureBlock for ProbeBlock {
    fn base(&self) -> &BlockBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BlockBase {
        &mut self.base
    }

    fn render(&self, _ctx: &RenderContext, out: &mut dyn fmt::Write) -> Result<()> {
        let data = self.base.data();
        if data.flag("explode") {
            return Err(Error::render(&data.block_type, "probe exploded"));
        }
        write!(
            out,
            "<div{} data-probe=\"{}\">{}</div>",
            self.attributes(),
            self.feature(),
            data.str_field("text").unwrap_or_default()
        )?;
        Ok(())
    }
}

/// Tune that adds class `tuned-<name>` and records itself as the last tune
/// applied. `{"reject": true}` fails validation.
#[derive(Debug, Clone)]
pub struct ClassTune {
    name: String,
}

impl ClassTune {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Feature for ClassTune {
    fn name(&self) -> &str {
        &self.name
    }

    fn constructor(&self) -> &str {
        "ClassTune"
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        if data.flag("reject") {
            return Err(Error::validation(&self.name, "tune payload rejected"));
        }
        Ok(())
    }
}

impl Tune for ClassTune {
    fn tune(
        &self,
        mut block: Box<dyn FeatureBlock>,
        _data: &BlockData,
    ) -> Result<Box<dyn FeatureBlock>> {
        let attrs = block.attributes_mut();
        attrs.add_class(format!("tuned-{}", self.name));
        attrs.set_data("last-tune", self.name.clone());
        Ok(block)
    }
}

/// Tune that wraps the block's output in `<section data-wrap="name">`
#[derive(Debug, Clone)]
pub struct WrapTune {
    name: String,
}

impl WrapTune {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Feature for WrapTune {
    fn name(&self) -> &str {
        &self.name
    }

    fn constructor(&self) -> &str {
        "WrapTune"
    }
}

impl Tune for WrapTune {
    fn tune(&self, block: Box<dyn FeatureBlock>, _data: &BlockData) -> Result<Box<dyn FeatureBlock>> {
        Ok(Box::new(Wrapped {
            inner: block,
            label: self.name.clone(),
        }))
    }
}

#[derive(Debug)]
struct Wrapped {
    inner: Box<dyn FeatureBlock>,
    label: String,
}

impl FeatureBlock for Wrapped {
    fn base(&self) -> &BlockBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut BlockBase {
        self.inner.base_mut()
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn fmt::Write) -> Result<()> {
        write!(out, "<section data-wrap=\"{}\">", self.label)?;
        self.inner.render(ctx, out)?;
        write!(out, "</section>")?;
        Ok(())
    }
}

/// Tool that mounts a route from `on_register`, guarded to run once
#[derive(Debug)]
pub struct HookedTool {
    once: Once,
    calls: AtomicUsize,
}

impl Default for HookedTool {
    fn default() -> Self {
        Self::new()
    }
}

impl HookedTool {
    pub fn new() -> Self {
        Self {
            once: Once::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the hook body actually ran
    pub fn side_effects(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Feature for HookedTool {
    fn name(&self) -> &str {
        "hooked"
    }

    fn constructor(&self) -> &str {
        "HookedTool"
    }

    fn on_register(&self, router: &mut dyn RouteRegistrar) {
        self.once.call_once(|| {
            self.calls.fetch_add(1, Ordering::SeqCst);
            router.register_route("POST", "/hooked/upload", "hooked-upload");
        });
    }
}

impl Tool for HookedTool {
    fn render(&self, data: BlockData) -> Result<Box<dyn FeatureBlock>> {
        Ok(Box::new(ProbeBlock {
            base: BlockBase::new("hooked", data),
        }))
    }
}

/// Registry holding one [`ProbeTool`] per name, in the given order
pub fn probe_registry(names: &[&str]) -> FeatureRegistry {
    let mut registry = FeatureRegistry::new();
    for name in names {
        registry.register(FeatureRegistration::tool(ProbeTool::new(*name)));
    }
    registry
}
