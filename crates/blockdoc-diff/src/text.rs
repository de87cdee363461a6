//! Inline text diff rendered as `<del>`/`<ins>` markup

use similar::{ChangeTag, TextDiff};

/// Token size the inline diff works at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Words,
    Chars,
}

/// Diff two plain-text strings into escaped HTML.
///
/// Consecutive tokens with the same change tag are merged into one
/// `<del>`/`<ins>` element.
pub fn inline_diff(old: &str, new: &str, granularity: Granularity) -> String {
    let diff = match granularity {
        Granularity::Words => TextDiff::from_words(old, new),
        Granularity::Chars => TextDiff::from_chars(old, new),
    };

    let mut out = String::new();
    let mut run: Option<(ChangeTag, String)> = None;
    for change in diff.iter_all_changes() {
        match run.as_mut() {
            Some((tag, text)) if *tag == change.tag() => text.push_str(change.value()),
            _ => {
                if let Some((tag, text)) = run.take() {
                    push_run(&mut out, tag, &text);
                }
                run = Some((change.tag(), change.value().to_string()));
            }
        }
    }
    if let Some((tag, text)) = run {
        push_run(&mut out, tag, &text);
    }
    out
}

fn push_run(out: &mut String, tag: ChangeTag, text: &str) {
    let escaped = html_escape::encode_text(text);
    match tag {
        ChangeTag::Equal => out.push_str(&escaped),
        ChangeTag::Delete => {
            out.push_str("<del>");
            out.push_str(&escaped);
            out.push_str("</del>");
        }
        ChangeTag::Insert => {
            out.push_str("<ins>");
            out.push_str(&escaped);
            out.push_str("</ins>");
        }
    }
}
