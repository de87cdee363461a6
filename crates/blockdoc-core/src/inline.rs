//! Batch rewriting of marked elements inside rendered fragments

use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::{Captures, Regex};

use crate::error::{Error, Result};

static ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .unwrap()
});

/// Attributes of one matched opening tag, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAttributes {
    attrs: IndexMap<String, Option<String>>,
}

impl ElementAttributes {
    fn parse(source: &str) -> Self {
        let attrs = ATTRIBUTE_PATTERN
            .captures_iter(source)
            .map(|caps| {
                let name = caps[1].to_ascii_lowercase();
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned());
                (name, value)
            })
            .collect();
        Self { attrs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)?.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), Some(value.into()));
    }

    pub fn remove(&mut self, name: &str) {
        self.attrs.shift_remove(name);
    }

    fn write_tag(&self, tag: &str, self_closing: bool) -> String {
        let mut out = format!("<{tag}");
        for (name, value) in &self.attrs {
            match value {
                Some(value) => {
                    out.push_str(&format!(
                        " {}=\"{}\"",
                        name,
                        html_escape::encode_double_quoted_attribute(value)
                    ));
                }
                None => {
                    out.push(' ');
                    out.push_str(name);
                }
            }
        }
        out.push_str(if self_closing { " />" } else { ">" });
        out
    }
}

/// Finds `<tag ... marker="id">` elements across fragments and rewrites
/// their attributes from one batched lookup.
#[derive(Debug, Clone)]
pub struct ElementRewriter {
    tag: String,
    marker: String,
    pattern: Regex,
}

impl ElementRewriter {
    pub fn new(tag: &str, marker: &str) -> Result<Self> {
        // Attribute values may contain unescaped `>`, so quoted values are
        // matched whole.
        let pattern = Regex::new(&format!(
            r#"(?i)<({})((?:\s+[^\s"'<>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?)*)\s*(/?)>"#,
            regex::escape(tag)
        ))
        .map_err(|e| Error::Config(format!("invalid element pattern for <{tag}>: {e}")))?;

        Ok(Self {
            tag: tag.to_ascii_lowercase(),
            marker: marker.to_ascii_lowercase(),
            pattern,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Every marker value referenced across `fragments`, first-seen order,
    /// without duplicates.
    pub fn collect_ids(&self, fragments: &[String]) -> Vec<String> {
        let mut ids = IndexSet::new();
        for fragment in fragments {
            for caps in self.pattern.captures_iter(fragment) {
                let attrs = ElementAttributes::parse(caps.get(2).map_or("", |m| m.as_str()));
                if let Some(id) = attrs.get(&self.marker).filter(|id| !id.is_empty()) {
                    ids.insert(id.to_string());
                }
            }
        }
        ids.into_iter().collect()
    }

    /// Rewrite each marked element whose id appears in `resolved`.
    ///
    /// Elements with unresolved ids are left byte-for-byte untouched.
    /// Returns the number of elements rewritten.
    pub fn rewrite<T, F>(&self, fragments: &mut [String], resolved: &HashMap<String, T>, mut apply: F) -> usize
    where
        F: FnMut(&T, &mut ElementAttributes),
    {
        let mut rewritten = 0;
        for fragment in fragments.iter_mut() {
            let replaced = self.pattern.replace_all(fragment, |caps: &Captures<'_>| {
                let mut attrs = ElementAttributes::parse(caps.get(2).map_or("", |m| m.as_str()));
                let target = attrs
                    .get(&self.marker)
                    .and_then(|id| resolved.get(id));
                match target {
                    Some(target) => {
                        apply(target, &mut attrs);
                        rewritten += 1;
                        attrs.write_tag(&caps[1], !caps[3].is_empty())
                    }
                    None => caps[0].to_string(),
                }
            });
            if let std::borrow::Cow::Owned(updated) = replaced {
                *fragment = updated;
            }
        }
        rewritten
    }
}
