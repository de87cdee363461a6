//! Code tool: `{code}` as escaped `<pre><code>`

use std::fmt;

use blockdoc_core::{
    BlockAttributes, BlockData, Feature, FeatureBlock, Media, RenderContext, Result, Tool,
};

use super::{DataBlock, script};

pub const NAME: &str = "code";

#[derive(Debug, Clone, Copy, Default)]
pub struct Code;

impl Feature for Code {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "CodeTool"
    }

    fn media(&self) -> Media {
        Media::new().with_js(script(NAME))
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        data.require_str("code")?;
        Ok(())
    }
}

impl Tool for Code {
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
        "<pre{attrs}><code>{}</code></pre>",
        html_escape::encode_text(data.str_field("code").unwrap_or_default())
    )?;
    Ok(())
}
