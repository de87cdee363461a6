//! Alignment tune: adds `text-<alignment>` to the block's outer element

use blockdoc_core::{
    BlockData, EditorContext, Error, Feature, FeatureBlock, Media, Result, Tune,
};
use serde_json::{Value, json};

use super::setting;

pub const NAME: &str = "alignment";

pub const ALIGNMENTS: [&str; 4] = ["left", "center", "right", "justify"];

pub const DEFAULT_ALIGNMENT: &str = "left";

#[derive(Debug, Clone, Copy, Default)]
pub struct Alignment;

fn alignment(data: &BlockData) -> &str {
    setting(data, NAME).unwrap_or(DEFAULT_ALIGNMENT)
}

impl Feature for Alignment {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "AlignmentTune"
    }

    fn config(&self, _ctx: &EditorContext) -> Value {
        json!({"default": DEFAULT_ALIGNMENT})
    }

    fn media(&self) -> Media {
        Media::new().with_js("blockdoc/tunes/alignment.js")
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        let value = alignment(data);
        if ALIGNMENTS.contains(&value) {
            Ok(())
        } else {
            Err(Error::validation(
                NAME,
                format!("unknown alignment `{value}`, expected one of {ALIGNMENTS:?}"),
            ))
        }
    }
}

impl Tune for Alignment {
    fn tune(
        &self,
        mut block: Box<dyn FeatureBlock>,
        data: &BlockData,
    ) -> Result<Box<dyn FeatureBlock>> {
        let class = format!("text-{}", alignment(data));
        block.attributes_mut().add_class(class);
        Ok(block)
    }
}
