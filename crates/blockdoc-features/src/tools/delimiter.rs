//! Delimiter tool: a thematic break

use std::fmt;

use blockdoc_core::{
    BlockAttributes, BlockData, Feature, FeatureBlock, Media, RenderContext, Result, Tool,
};

use super::{DataBlock, script};

pub const NAME: &str = "delimiter";

#[derive(Debug, Clone, Copy, Default)]
pub struct Delimiter;

impl Feature for Delimiter {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "Delimiter"
    }

    fn media(&self) -> Media {
        Media::new().with_js(script(NAME))
    }
}

impl Tool for Delimiter {
    fn render(&self, data: BlockData) -> Result<Box<dyn FeatureBlock>> {
        Ok(DataBlock::boxed(NAME, data, render))
    }
}

fn render(
    _data: &BlockData,
    attrs: &BlockAttributes,
    _ctx: &RenderContext,
    out: &mut dyn fmt::Write,
) -> Result<()> {
    write!(out, "<hr{attrs}>")?;
    Ok(())
}
