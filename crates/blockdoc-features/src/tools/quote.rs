//! Quote tool: `{text, caption}` as `<blockquote>`

use std::fmt;

use blockdoc_core::{
    BlockAttributes, BlockData, EditorContext, Feature, FeatureBlock, Media, RenderContext,
    Result, Tool,
};
use serde_json::{Value, json};

use super::{DataBlock, script};

pub const NAME: &str = "quote";

#[derive(Debug, Clone, Copy, Default)]
pub struct Quote;

impl Feature for Quote {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "Quote"
    }

    fn config(&self, _ctx: &EditorContext) -> Value {
        json!({"captionPlaceholder": "Author"})
    }

    fn media(&self) -> Media {
        Media::new().with_js(script(NAME))
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        data.require_str("text")?;
        if data.data.contains_key("caption") {
            data.require_str("caption")?;
        }
        Ok(())
    }
}

impl Tool for Quote {
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
    write!(
        out,
        "<blockquote{attrs}><p>{}</p>",
        data.str_field("text").unwrap_or_default()
    )?;
    if let Some(caption) = data.str_field("caption").filter(|c| !c.trim().is_empty()) {
        write!(out, "<footer>{caption}</footer>")?;
    }
    out.write_str("</blockquote>")?;
    Ok(())
}
