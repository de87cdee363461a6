//! Header tool: `{text, level}` as `<h1>`..`<h6>`

use std::fmt;

use blockdoc_core::{
    BlockAttributes, BlockData, EditorContext, Error, Feature, FeatureBlock, Media,
    RenderContext, Result, Tool, json_kind,
};
use serde_json::{Value, json};

use super::{DataBlock, script};

pub const NAME: &str = "header";

/// Level used when a block does not carry one
pub const DEFAULT_LEVEL: u64 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Header;

fn level(data: &BlockData) -> Result<u64> {
    match data.data.get("level") {
        None | Some(Value::Null) => Ok(DEFAULT_LEVEL),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(level @ 1..=6) => Ok(level),
            _ => Err(Error::validation(
                NAME,
                format!("level must be between 1 and 6, got {n}"),
            )),
        },
        Some(other) => Err(Error::validation(
            NAME,
            format!("level must be a number, got {}", json_kind(other)),
        )),
    }
}

impl Feature for Header {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "Header"
    }

    fn config(&self, _ctx: &EditorContext) -> Value {
        json!({
            "levels": [1, 2, 3, 4, 5, 6],
            "defaultLevel": DEFAULT_LEVEL,
        })
    }

    fn media(&self) -> Media {
        Media::new().with_js(script(NAME))
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        data.require_str("text")?;
        level(data)?;
        Ok(())
    }
}

impl Tool for Header {
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
    let level = level(data).map_err(|e| Error::render(NAME, e.to_string()))?;
    write!(
        out,
        "<h{level}{attrs}>{}</h{level}>",
        data.str_field("text").unwrap_or_default()
    )?;
    Ok(())
}
