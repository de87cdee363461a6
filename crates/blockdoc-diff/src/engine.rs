//! Block-level revision diff between two documents

use blockdoc_core::{DiffConfig, Document, FeatureRegistry, RenderContext};
use tracing::{debug, warn};

use crate::lcs::{EditOp, edit_script};
use crate::normalize::{identity_key, normalize_html, placeholder};
use crate::text::{Granularity, inline_diff};

/// Tuning knobs for [`Differ`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Size of the alignment table (old blocks x new blocks) above which a
    /// warning is logged. The diff still runs.
    pub max_cells: usize,
    /// Inline diff of modified blocks by word instead of by character
    pub word_level: bool,
    /// Leading words of the label used for blocks with no text
    pub placeholder_prefix: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::from_config(&DiffConfig::default())
    }
}

impl DiffOptions {
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            max_cells: config.max_cells,
            word_level: config.word_level,
            placeholder_prefix: "empty block".to_string(),
        }
    }

    fn granularity(&self) -> Granularity {
        if self.word_level {
            Granularity::Words
        } else {
            Granularity::Chars
        }
    }
}

/// How one block differs between two revisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockChange {
    /// Same identity and same text; carries the new rendering
    Unchanged { key: String, html: String },
    /// Same identity, different text
    Modified {
        key: String,
        old_text: String,
        new_text: String,
    },
    /// Only in the old revision
    Removed {
        key: String,
        html: String,
        text: String,
    },
    /// Only in the new revision
    Added {
        key: String,
        html: String,
        text: String,
    },
}

impl BlockChange {
    pub fn key(&self) -> &str {
        match self {
            Self::Unchanged { key, .. }
            | Self::Modified { key, .. }
            | Self::Removed { key, .. }
            | Self::Added { key, .. } => key,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }
}

/// One block as the diff sees it
struct Snapshot {
    key: String,
    html: String,
    text: String,
}

/// Compares two revisions of a document block by block.
///
/// Blocks are aligned on their identity keys with an LCS table that costs
/// O(n·m) time and memory; see [`DiffOptions::max_cells`].
#[derive(Debug, Clone)]
pub struct Differ<'r> {
    registry: &'r FeatureRegistry,
    options: DiffOptions,
    ctx: RenderContext,
}

impl<'r> Differ<'r> {
    pub fn new(registry: &'r FeatureRegistry) -> Self {
        Self {
            registry,
            options: DiffOptions::default(),
            ctx: RenderContext::new(),
        }
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    /// Render blocks with `ctx`. Debug markers are always turned off so a
    /// failing block diffs as empty.
    pub fn with_context(mut self, ctx: RenderContext) -> Self {
        self.ctx = ctx.with_debug(false);
        self
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Structured, script-ordered view of the differences
    pub fn changes(&self, old: &Document, new: &Document) -> Vec<BlockChange> {
        let old_blocks = self.snapshot(old);
        let new_blocks = self.snapshot(new);

        let cells = old_blocks.len().saturating_mul(new_blocks.len());
        if cells > self.options.max_cells {
            warn!(
                old_blocks = old_blocks.len(),
                new_blocks = new_blocks.len(),
                max_cells = self.options.max_cells,
                "diff alignment table exceeds configured size"
            );
        }

        let old_keys: Vec<&str> = old_blocks.iter().map(|b| b.key.as_str()).collect();
        let new_keys: Vec<&str> = new_blocks.iter().map(|b| b.key.as_str()).collect();
        let script = edit_script(&old_keys, &new_keys);
        debug!(
            old_blocks = old_blocks.len(),
            new_blocks = new_blocks.len(),
            steps = script.len(),
            "computed block edit script"
        );

        script
            .into_iter()
            .map(|op| match op {
                EditOp::Equal { old, new } => {
                    let (old, new) = (&old_blocks[old], &new_blocks[new]);
                    if old.text == new.text {
                        BlockChange::Unchanged {
                            key: new.key.clone(),
                            html: new.html.clone(),
                        }
                    } else {
                        BlockChange::Modified {
                            key: new.key.clone(),
                            old_text: old.text.clone(),
                            new_text: new.text.clone(),
                        }
                    }
                }
                EditOp::Delete { old } => {
                    let block = &old_blocks[old];
                    BlockChange::Removed {
                        key: block.key.clone(),
                        html: block.html.clone(),
                        text: block.text.clone(),
                    }
                }
                EditOp::Insert { new } => {
                    let block = &new_blocks[new];
                    BlockChange::Added {
                        key: block.key.clone(),
                        html: block.html.clone(),
                        text: block.text.clone(),
                    }
                }
            })
            .collect()
    }

    /// HTML fragment showing `new` against `old`.
    ///
    /// Display only. Never fails: blocks that cannot render count as empty.
    pub fn diff(&self, old: &Document, new: &Document) -> String {
        let mut out = String::new();
        for change in self.changes(old, new) {
            self.write_change(&mut out, &change);
        }
        out
    }

    fn write_change(&self, out: &mut String, change: &BlockChange) {
        let (class, body) = match change {
            BlockChange::Unchanged { html, .. } => {
                out.push_str(html);
                return;
            }
            BlockChange::Modified {
                old_text, new_text, ..
            } => (
                "diff-modified",
                inline_diff(old_text, new_text, self.options.granularity()),
            ),
            BlockChange::Removed { html, text, .. } => ("diff-removed", visible(html, text)),
            BlockChange::Added { html, text, .. } => ("diff-added", visible(html, text)),
        };
        out.push_str(&format!(
            "<div class=\"diff-block {class}\" data-block-key=\"{}\">{body}</div>",
            html_escape::encode_double_quoted_attribute(change.key()),
        ));
    }

    fn snapshot(&self, doc: &Document) -> Vec<Snapshot> {
        let fragments = doc.render_fragments(self.registry, &self.ctx);
        doc.iter()
            .zip(fragments)
            .enumerate()
            .map(|(index, (block, html))| {
                let mut text = normalize_html(&html);
                if text.is_empty() {
                    text = placeholder(&self.options.placeholder_prefix, index, block.block_type());
                }
                Snapshot {
                    key: identity_key(block, index),
                    html,
                    text,
                }
            })
            .collect()
    }
}

/// Rendered HTML, or the escaped text label when nothing rendered
fn visible(html: &str, text: &str) -> String {
    if html.trim().is_empty() {
        html_escape::encode_text(text).into_owned()
    } else {
        html.to_string()
    }
}
