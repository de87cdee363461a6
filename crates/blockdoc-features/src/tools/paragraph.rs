//! Paragraph tool: `{text}` as `<p>`

use std::fmt;

use blockdoc_core::{
    BlockAttributes, BlockData, Feature, FeatureBlock, Media, RenderContext, Result, Tool,
};

use super::{DataBlock, script};

pub const NAME: &str = "paragraph";

/// `text` is editor-produced inline HTML and is written as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paragraph;

impl Feature for Paragraph {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "Paragraph"
    }

    fn media(&self) -> Media {
        Media::new().with_js(script(NAME))
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        data.require_str("text")?;
        Ok(())
    }
}

impl Tool for Paragraph {
    fn render(&self, data: BlockData) -> Result<Box<dyn FeatureBlock>> {
        Ok(DataBlock::boxed(NAME, data, render))
    }
}

fn render(
    data: &BlockData,
    attrs: &BlockAttributes,
    _ctx: &RenderContext,
    out: &mut dyn fmt::Write,
) -> Result<()> {
    write!(out, "<p{attrs}>{}</p>", data.str_field("text").unwrap_or_default())?;
    Ok(())
}
