//! List tool: nested ordered and unordered lists
//!
//! ```json
//! {"style": "ordered", "items": ["one", {"content": "two", "items": ["two.a"]}]}
//! ```
//!
//! Items are plain strings or `{content, items}` objects; nesting keeps the
//! parent's style.

use std::fmt;

use blockdoc_core::{
    BlockAttributes, BlockData, EditorContext, Error, Feature, FeatureBlock, Media,
    RenderContext, Result, Tool, json_kind,
};
use serde_json::{Value, json};

use super::{DataBlock, script};

pub const NAME: &str = "list";

/// Deepest nesting accepted from stored data
const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct List;

fn list_tag(data: &BlockData) -> Result<&'static str> {
    match data.str_field("style") {
        None | Some("unordered") => Ok("ul"),
        Some("ordered") => Ok("ol"),
        Some(other) => Err(Error::validation(
            NAME,
            format!("style must be `ordered` or `unordered`, got `{other}`"),
        )),
    }
}

fn check_items(items: &Value, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::validation(NAME, "list nesting is too deep"));
    }
    let Value::Array(items) = items else {
        return Err(Error::validation(
            NAME,
            format!("items must be an array, got {}", json_kind(items)),
        ));
    };
    for item in items {
        match item {
            Value::String(_) => {}
            Value::Object(fields) => {
                match fields.get("content") {
                    Some(Value::String(_)) => {}
                    Some(other) => {
                        return Err(Error::validation(
                            NAME,
                            format!("item content must be a string, got {}", json_kind(other)),
                        ));
                    }
                    None => return Err(Error::validation(NAME, "item is missing `content`")),
                }
                if let Some(children) = fields.get("items") {
                    check_items(children, depth + 1)?;
                }
            }
            other => {
                return Err(Error::validation(
                    NAME,
                    format!("item must be a string or object, got {}", json_kind(other)),
                ));
            }
        }
    }
    Ok(())
}

impl Feature for List {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "NestedList"
    }

    fn config(&self, _ctx: &EditorContext) -> Value {
        json!({"defaultStyle": "unordered"})
    }

    fn media(&self) -> Media {
        Media::new().with_js(script(NAME))
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        list_tag(data)?;
        match data.data.get("items") {
            Some(items) => check_items(items, 0),
            None => Err(Error::validation(NAME, "missing field `items`")),
        }
    }
}

impl Tool for List {
    fn render(&self, data: BlockData) -> Result<Box<dyn FeatureBlock>> {
        Ok(DataBlock::boxed(NAME, data, render))
    }
}

fn write_items(out: &mut dyn fmt::Write, tag: &str, items: &[Value]) -> fmt::Result {
    for item in items {
        out.write_str("<li>")?;
        match item {
            Value::String(text) => out.write_str(text)?,
            Value::Object(fields) => {
                if let Some(content) = fields.get("content").and_then(Value::as_str) {
                    out.write_str(content)?;
                }
                if let Some(children) = fields
                    .get("items")
                    .and_then(Value::as_array)
                    .filter(|c| !c.is_empty())
                {
                    write!(out, "<{tag}>")?;
                    write_items(out, tag, children)?;
                    write!(out, "</{tag}>")?;
                }
            }
            _ => {}
        }
        out.write_str("</li>")?;
    }
    Ok(())
}

fn render(
    data: &BlockData,
    attrs: &BlockAttributes,
    _ctx: &RenderContext,
    out: &mut dyn fmt::Write,
) -> Result<()> {
    let tag = list_tag(data).map_err(|e| Error::render(NAME, e.to_string()))?;
    let items = data
        .data
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    write!(out, "<{tag}{attrs}>")?;
    write_items(out, tag, items)?;
    write!(out, "</{tag}>")?;
    Ok(())
}
