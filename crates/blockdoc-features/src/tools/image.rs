//! Image tool
//!
//! Blocks reference either an uploaded file directly or an image stored by
//! the host:
//!
//! ```json
//! {"file": {"url": "/media/a.png"}, "caption": "A", "withBorder": true}
//! {"image_id": "42", "caption": "B"}
//! ```
//!
//! `image_id` references are resolved in one batch through an
//! [`ImageSource`] before the document renders.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, Once};

use blockdoc_core::{
    BlockAttributes, BlockBase, BlockData, EditorContext, Error, Feature, FeatureBlock, Media,
    Prefetch, RenderContext, Result, RouteRegistrar, Tool,
};
use regex::Regex;
use serde_json::{Value, json};
use tracing::debug;

use super::script;

pub const NAME: &str = "image";

/// Path of the upload endpoint, relative to the editor base URL
pub const UPLOAD_PATH: &str = "blocks/image/upload";

/// Route name of the upload endpoint
pub const UPLOAD_ROUTE: &str = "blockdoc-image-upload";

/// Shared by every `ImageTool` in the process
static UPLOAD_ROUTE_MOUNTED: Once = Once::new();

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Host storage the image tool resolves `image_id` references against
pub trait ImageSource: Send + Sync {
    /// Map each known id to its public URL. Unknown ids are left out.
    fn urls(&self, ids: &[String]) -> Result<HashMap<String, String>>;
}

impl ImageSource for HashMap<String, String> {
    fn urls(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.get(id).map(|url| (id.clone(), url.clone())))
            .collect())
    }
}

/// Display flags and the CSS class each one adds to the `<figure>`
const FLAGS: [(&str, &str); 3] = [
    ("withBorder", "image--bordered"),
    ("stretched", "image--stretched"),
    ("withBackground", "image--backgrounded"),
];

pub struct ImageTool {
    source: Option<Arc<dyn ImageSource>>,
}

impl fmt::Debug for ImageTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTool")
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl Default for ImageTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageTool {
    pub fn new() -> Self {
        Self { source: None }
    }

    pub fn with_source(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.source = Some(source);
        self
    }
}

fn file_url(data: &BlockData) -> Option<&str> {
    data.data
        .get("file")?
        .get("url")?
        .as_str()
        .filter(|url| !url.is_empty())
}

fn image_id(data: &BlockData) -> Option<String> {
    match data.data.get("image_id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Feature for ImageTool {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "ImageTool"
    }

    fn config(&self, ctx: &EditorContext) -> Value {
        json!({
            "endpoints": {"byFile": ctx.url(UPLOAD_PATH)},
            "captionPlaceholder": "Caption",
        })
    }

    fn media(&self) -> Media {
        Media::new()
            .with_js(script(NAME))
            .with_css("blockdoc/tools/image.css")
    }

    fn validate(&self, data: &BlockData) -> Result<()> {
        if file_url(data).is_none() && image_id(data).is_none() {
            return Err(Error::validation(
                NAME,
                "either `file.url` or `image_id` is required",
            ));
        }
        if data.data.contains_key("caption") {
            data.require_str("caption")?;
        }
        Ok(())
    }

    fn on_register(&self, router: &mut dyn RouteRegistrar) {
        UPLOAD_ROUTE_MOUNTED.call_once(|| {
            debug!(path = UPLOAD_PATH, "mounting image upload route");
            router.register_route("POST", UPLOAD_PATH, UPLOAD_ROUTE);
        });
    }
}

impl Tool for ImageTool {
    fn render(&self, data: BlockData) -> Result<Box<dyn FeatureBlock>> {
        let mut base = BlockBase::new(NAME, data);
        for (flag, class) in FLAGS {
            if base.data().flag(flag) {
                base.attributes.add_class(class);
            }
        }
        Ok(Box::new(ImageBlock { base }))
    }
}

impl Prefetch for ImageTool {
    fn prefetch(&self, blocks: &[&dyn FeatureBlock], ctx: &mut RenderContext) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        let ids: Vec<String> = blocks
            .iter()
            .map(|block| block.base().data())
            .filter(|data| file_url(data).is_none())
            .filter_map(image_id)
            .collect();
        if ids.is_empty() {
            return Ok(());
        }

        let urls = source.urls(&ids)?;
        debug!(requested = ids.len(), found = urls.len(), "prefetched image urls");
        for (id, url) in urls {
            ctx.store(NAME, id, Value::String(url));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ImageBlock {
    base: BlockBase,
}

impl ImageBlock {
    fn url(&self, ctx: &RenderContext) -> Result<String> {
        let data = self.base.data();
        if let Some(url) = file_url(data) {
            return Ok(url.to_string());
        }
        let id = image_id(data).unwrap_or_default();
        ctx.lookup(NAME, &id)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::render(NAME, format!("image `{id}` could not be resolved")))
    }
}

impl FeatureBlock for ImageBlock {
    fn base(&self) -> &BlockBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BlockBase {
        &mut self.base
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn fmt::Write) -> Result<()> {
        let url = self.url(ctx)?;
        let caption = self.base.data().str_field("caption").unwrap_or_default();
        let attrs: &BlockAttributes = &self.base.attributes;

        write!(
            out,
            "<figure{attrs}><img src=\"{}\" alt=\"{}\">",
            html_escape::encode_double_quoted_attribute(&url),
            html_escape::encode_double_quoted_attribute(&strip_tags(caption)),
        )?;
        if !caption.trim().is_empty() {
            write!(out, "<figcaption>{caption}</figcaption>")?;
        }
        out.write_str("</figure>")?;
        Ok(())
    }
}

/// Caption text without inline markup, for the `alt` attribute
fn strip_tags(html: &str) -> String {
    html_escape::decode_html_entities(&TAG.replace_all(html, "")).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strip_tags_keeps_text() {
        assert_eq!(strip_tags("A <b>bold</b> &amp; plain"), "A bold & plain");
        assert_eq!(strip_tags(r#"<a href="/x">link</a>&lt;b&gt;"#), "link<b>");
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn numeric_image_ids_are_accepted() {
        let data = BlockData::new(NAME).with_data("image_id", 42);
        assert_eq!(image_id(&data).as_deref(), Some("42"));
        assert!(ImageTool::new().validate(&data).is_ok());
    }

    #[test]
    fn empty_references_fail_validation() {
        let data = BlockData::new(NAME)
            .with_data("file", json!({"url": ""}))
            .with_data("image_id", "");
        assert!(ImageTool::new().validate(&data).unwrap_err().is_validation());
    }
}
