//! Internal page links
//!
//! Editors insert `<a data-page-id="…">` for links to other pages. At render
//! time every referenced page across the document is resolved in one call
//! and each anchor gets its current `href` (and `title` when none is set).

use std::collections::HashMap;
use std::sync::Arc;

use blockdoc_core::{ElementRewriter, Feature, InlineFeature, Media, RenderContext, Result};
use tracing::debug;

pub const NAME: &str = "links";

/// Marker attribute carrying the page id
pub const MARKER: &str = "data-page-id";

/// Where a page currently lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub url: String,
    pub title: Option<String>,
}

impl PageLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Host lookup from page ids to their links
pub trait LinkResolver: Send + Sync {
    /// Resolve all `ids` at once. Ids that no longer exist are left out.
    fn resolve(&self, ids: &[String]) -> Result<HashMap<String, PageLink>>;
}

impl LinkResolver for HashMap<String, PageLink> {
    fn resolve(&self, ids: &[String]) -> Result<HashMap<String, PageLink>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.get(id).map(|link| (id.clone(), link.clone())))
            .collect())
    }
}

pub struct Links {
    resolver: Arc<dyn LinkResolver>,
}

impl std::fmt::Debug for Links {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Links").finish_non_exhaustive()
    }
}

impl Links {
    pub fn new(resolver: Arc<dyn LinkResolver>) -> Self {
        Self { resolver }
    }
}

impl Feature for Links {
    fn name(&self) -> &str {
        NAME
    }

    fn constructor(&self) -> &str {
        "PageLinkTool"
    }

    fn media(&self) -> Media {
        Media::new().with_js("blockdoc/inline/links.js")
    }
}

impl InlineFeature for Links {
    fn rewrite(&self, _ctx: &RenderContext, fragments: &mut [String]) -> Result<()> {
        let rewriter = ElementRewriter::new("a", MARKER)?;
        let ids = rewriter.collect_ids(fragments);
        if ids.is_empty() {
            return Ok(());
        }

        let links = self.resolver.resolve(&ids)?;
        let rewritten = rewriter.rewrite(fragments, &links, |link, attrs| {
            attrs.set("href", link.url.as_str());
            if let Some(title) = &link.title {
                if !attrs.contains("title") {
                    attrs.set("title", title.as_str());
                }
            }
        });
        debug!(
            referenced = ids.len(),
            resolved = links.len(),
            rewritten,
            "resolved page links"
        );
        Ok(())
    }
}
