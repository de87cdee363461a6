//! Text variant tune: presents a block as a call-out, citation, or details
//! box by wrapping its output in an `<aside>`.

use std::fmt;

use blockdoc_core::{
    BlockBase, BlockData, Error, Feature, FeatureBlock, Media, RenderContext, Result, Tune,
};

use super::setting;

pub const NAME: &str = "text-variant";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    CallOut,
    Citation,
    Details,
}

impl Variant {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "call-out" => Some(Self::CallOut),
            "citation" => Some(Self::Citation),
            "details" => Some(Self::Details),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CallOut => "call-out",
            Self::Citation => "citation",
            Self::Details => "details",
        }
    }
}

/// An empty or missing variant leaves the block alone
fn variant(data: &BlockData) -> Result<Option<Variant>> {
    match setting(data, "variant").filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => Variant::parse(value).map(Some).ok_or_else(|| {
            Error::validation(NAME, format!("unknown text variant `{value}`"))
        }),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextVariant;

impl Feature for TextVariant {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "TextVariantTune"
    }

    fn media(&self) -> Media {
        Media::new()
            .with_js("blockdoc/tunes/text-variant.js")
            .with_css("blockdoc/tunes/text-variant.css")
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        variant(data).map(|_| ())
    }
}

impl Tune for TextVariant {
    fn tune(&self, block: Box<dyn FeatureBlock>, data: &BlockData) -> Result<Box<dyn FeatureBlock>> {
        Ok(match variant(data)? {
            Some(variant) => Box::new(VariantBlock {
                inner: block,
                variant,
            }),
            None => block,
        })
    }
}

/// Renders the wrapped block inside a variant container. Identity and data
/// are the wrapped block's.
#[derive(Debug)]
pub struct VariantBlock {
    inner: Box<dyn FeatureBlock>,
    variant: Variant,
}

impl VariantBlock {
    pub fn variant(&self) -> Variant {
        self.variant
    }
}

impl FeatureBlock for VariantBlock {
    fn base(&self) -> &BlockBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut BlockBase {
        self.inner.base_mut()
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn fmt::Write) -> Result<()> {
        let variant = self.variant.as_str();
        write!(out, "<aside class=\"text-variant text-variant--{variant}\">")?;
        self.inner.render(ctx, out)?;
        out.write_str("</aside>")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("call-out"), Some(Variant::CallOut))]
    #[case(json!({"variant": "details"}), Some(Variant::Details))]
    #[case(json!(""), None)]
    #[case(json!({}), None)]
    fn reads_variant_from_payload(#[case] payload: serde_json::Value, #[case] expected: Option<Variant>) {
        let data = BlockData::for_tune("b1", NAME, &payload);
        assert_eq!(variant(&data).unwrap(), expected);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let data = BlockData::for_tune("b1", NAME, &json!("shout"));
        assert!(TextVariant.validate(&data).unwrap_err().is_validation());
    }
}
