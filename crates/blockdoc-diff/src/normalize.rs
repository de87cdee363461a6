//! Plain-text projection of rendered blocks

use std::sync::LazyLock;

use blockdoc_core::FeatureBlock;
use regex::Regex;

/// Tags that separate words when stripped
static BREAKING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:address|article|aside|blockquote|br|dd|div|dl|dt|figcaption|figure|h[1-6]|hr|li|ol|p|pre|section|table|td|th|tr|ul)\b[^>]*>",
    )
    .unwrap()
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup from rendered HTML, decode entities, collapse whitespace
/// runs into single spaces and trim.
pub fn normalize_html(html: &str) -> String {
    let spaced = BREAKING_TAG.replace_all(html, " ");
    let stripped = ANY_TAG.replace_all(&spaced, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Label standing in for a block whose text normalizes to nothing
pub fn placeholder(prefix: &str, index: usize, block_type: &str) -> String {
    format!("{prefix} {index}: {block_type}")
}

/// Identity used to align blocks across revisions: the block id, or
/// `<type>#<index>` for blocks without one.
pub fn identity_key(block: &dyn FeatureBlock, index: usize) -> String {
    if block.id().is_empty() {
        format!("{}#{}", block.block_type(), index)
    } else {
        block.id().to_string()
    }
}
