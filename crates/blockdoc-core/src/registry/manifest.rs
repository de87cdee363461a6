//! Declarative editor configuration built from the registry

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::FeatureRegistry;
use crate::error::Result;
use crate::feature::EditorContext;

/// Client-side configuration for one active feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolConfig {
    /// Client class identifier
    pub class: String,
    pub config: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tunes: Vec<String>,
}

/// Manifest consumed by the client editor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorConfig {
    /// Active features keyed by name, in resolution order
    pub tools: IndexMap<String, ToolConfig>,
    /// Document-level tunes that are also active
    pub tunes: Vec<String>,
}

impl EditorConfig {
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl FeatureRegistry {
    /// Build the editor manifest for `active` features.
    ///
    /// Depends only on `ctx`, `active`, and registry state, so identical
    /// inputs give identical output. Associated and global tunes are only
    /// listed when they are active themselves.
    pub fn build_config<S: AsRef<str>>(&self, ctx: &EditorContext, active: &[S]) -> EditorConfig {
        let scope = self.scope(active);

        let tools = scope
            .iter()
            .map(|reg| {
                let tunes = self
                    .tunes_for(reg.name())
                    .iter()
                    .filter(|tune| scope.contains(tune.as_str()))
                    .cloned()
                    .collect();
                let config = ToolConfig {
                    class: reg.constructor().to_string(),
                    config: reg.config(ctx),
                    tunes,
                };
                (reg.name().to_string(), config)
            })
            .collect();

        let tunes = self
            .global_tunes()
            .iter()
            .filter(|tune| scope.contains(tune.as_str()))
            .cloned()
            .collect();

        EditorConfig { tools, tunes }
    }
}
