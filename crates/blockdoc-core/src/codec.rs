//! Document <-> transport conversion

use tracing::debug;

use crate::document::{Document, DocumentData};
use crate::error::{Error, Result};
use crate::registry::FeatureRegistry;
use crate::tune::apply_tunes;

impl Document {
    /// Build a document from transport data under the `features` scope.
    ///
    /// Blocks whose type is not an active feature are skipped. A block or
    /// tune rejected by its validator aborts the whole decode; so does a
    /// block type registered as something other than a tool.
    pub fn decode<S: AsRef<str>>(
        registry: &FeatureRegistry,
        features: &[S],
        data: DocumentData,
    ) -> Result<Self> {
        let scope = registry.scope(features);
        let mut doc = Document::new()
            .with_features(features)
            .with_time(data.time)
            .with_version(data.version);

        for raw in data.blocks {
            let Some(reg) = scope.get(&raw.block_type) else {
                debug!(block_type = %raw.block_type, block_id = %raw.id, "skipping block of unknown type");
                continue;
            };

            reg.validate(&raw)?;

            let tool = reg.as_tool().ok_or_else(|| {
                Error::structural(
                    reg.name(),
                    format!("registered as {}, cannot render blocks", reg.kind()),
                )
            })?;

            let tunes = raw.tunes.clone();
            let block = tool.render(raw)?;
            let block = apply_tunes(&scope, block, &tunes)?;
            doc.push(block);
        }

        Ok(doc)
    }

    /// Produce transport data, dropping blocks whose feature is no longer
    /// registered or active for this document.
    pub fn encode(&self, registry: &FeatureRegistry) -> DocumentData {
        let scope = registry.scope(self.features());
        let blocks = self
            .iter()
            .filter(|block| {
                let known = scope.contains(block.block_type());
                if !known {
                    debug!(block_type = %block.block_type(), block_id = %block.id(), "dropping block of unregistered type");
                }
                known
            })
            .map(|block| block.data())
            .collect();

        DocumentData {
            time: self.time,
            blocks,
            version: self.version.clone(),
        }
    }
}
