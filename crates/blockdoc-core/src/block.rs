//! Block transport data and the constructed block capability

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::render::RenderContext;

/// Wire representation of one content block.
///
/// `data` and `tunes` are plugin-defined payloads; the engine never looks
/// inside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub tunes: Map<String, Value>,
}

impl BlockData {
    /// Create an empty block of the given type
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            ..Default::default()
        }
    }

    /// Present a tune payload as block data so tunes share the validator
    /// contract with tools. Non-object payloads land under `"value"`.
    pub fn for_tune(block_id: &str, tune: &str, value: &Value) -> Self {
        let data = match value {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other.clone());
                map
            }
        };
        Self {
            id: block_id.to_string(),
            block_type: tune.to_string(),
            data,
            tunes: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_tune(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tunes.insert(name.into(), value.into());
        self
    }

    /// Optional string field from `data`
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Required string field from `data`, reported against this block's type
    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.data.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(Error::validation(
                &self.block_type,
                format!("field `{key}` must be a string, got {}", json_kind(other)),
            )),
            None => Err(Error::validation(
                &self.block_type,
                format!("missing field `{key}`"),
            )),
        }
    }

    /// Optional boolean flag from `data`, false when absent
    pub fn flag(&self, key: &str) -> bool {
        self.data.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// JSON type name of `value`, for validation messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// HTML attributes accumulated on a block's outer element.
///
/// Classes keep insertion order and are never duplicated; other attributes
/// are last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockAttributes {
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
}

impl BlockAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Set a `data-*` attribute
    pub fn set_data(&mut self, name: &str, value: impl Into<String>) {
        self.set(format!("data-{name}"), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.attrs.is_empty()
    }

    /// Write the attributes as they appear inside an opening tag,
    /// each preceded by a space.
    pub fn write_to(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        if !self.classes.is_empty() {
            let joined = self.classes.join(" ");
            write!(
                out,
                " class=\"{}\"",
                html_escape::encode_double_quoted_attribute(&joined)
            )?;
        }
        for (name, value) in &self.attrs {
            write!(
                out,
                " {}=\"{}\"",
                name,
                html_escape::encode_double_quoted_attribute(value)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for BlockAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// State every constructed block carries: its transport data, the name of
/// the feature that built it, and the attributes tunes have added.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBase {
    data: BlockData,
    feature: String,
    pub attributes: BlockAttributes,
}

impl BlockBase {
    pub fn new(feature: impl Into<String>, data: BlockData) -> Self {
        Self {
            data,
            feature: feature.into(),
            attributes: BlockAttributes::new(),
        }
    }

    pub fn data(&self) -> &BlockData {
        &self.data
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }
}

/// A constructed, renderable block.
///
/// Implementors provide access to their [`BlockBase`] and the HTML emission;
/// identity, attributes, and round-trip data come from the base.
pub trait FeatureBlock: fmt::Debug + Send + Sync {
    fn base(&self) -> &BlockBase;

    fn base_mut(&mut self) -> &mut BlockBase;

    /// Emit this block's HTML
    fn render(&self, ctx: &RenderContext, out: &mut dyn fmt::Write) -> Result<()>;

    fn id(&self) -> &str {
        &self.base().data.id
    }

    fn block_type(&self) -> &str {
        &self.base().data.block_type
    }

    /// Registry name of the feature that constructed this block
    fn feature(&self) -> &str {
        self.base().feature()
    }

    fn attributes(&self) -> &BlockAttributes {
        &self.base().attributes
    }

    fn attributes_mut(&mut self) -> &mut BlockAttributes {
        &mut self.base_mut().attributes
    }

    /// Re-derive the transport form of this block
    fn data(&self) -> BlockData {
        self.base().data.clone()
    }
}
