//! Diffing decoded revisions of a document

use std::sync::Arc;

use blockdoc_core::{Document, FeatureRegistry};
use blockdoc_diff::{BlockChange, CompareDispatcher, DiffOptions, Differ, register};
use blockdoc_features::builtin_registry;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn decode(registry: &FeatureRegistry, blocks: Value) -> Document {
    let source = json!({"time": 1, "blocks": blocks, "version": "2.30.7"}).to_string();
    Document::from_json(registry, &[] as &[&str], &source).unwrap()
}

fn first_revision(registry: &FeatureRegistry) -> Document {
    decode(
        registry,
        json!([
            {"id": "h", "type": "header", "data": {"text": "Release notes", "level": 2}},
            {"id": "d", "type": "delimiter", "data": {}},
            {"id": "p", "type": "paragraph", "data": {"text": "Fixed the <b>parser</b>."}},
            {"id": "q", "type": "quote", "data": {"text": "Ship it", "caption": "Team"}}
        ]),
    )
}

#[test]
fn test_revision_diff_marks_each_kind_of_change() {
    let registry = builtin_registry();
    let old = first_revision(&registry);
    let new = decode(
        &registry,
        json!([
            {"id": "h", "type": "header", "data": {"text": "Release notes", "level": 3}},
            {"id": "d", "type": "delimiter", "data": {}},
            {"id": "p", "type": "paragraph", "data": {"text": "Fixed the <i>lexer</i>."}},
            {"id": "c", "type": "code", "data": {"code": "cargo update"}}
        ]),
    );

    let changes = Differ::new(&registry).changes(&old, &new);
    let summary: Vec<(&str, &str)> = changes
        .iter()
        .map(|change| {
            let kind = match change {
                BlockChange::Unchanged { .. } => "unchanged",
                BlockChange::Modified { .. } => "modified",
                BlockChange::Removed { .. } => "removed",
                BlockChange::Added { .. } => "added",
            };
            (change.key(), kind)
        })
        .collect();

    // header level change renders differently but reads the same
    assert_eq!(
        summary,
        vec![
            ("h", "unchanged"),
            ("d", "unchanged"),
            ("p", "modified"),
            ("q", "removed"),
            ("c", "added"),
        ]
    );

    let html = Differ::new(&registry).diff(&old, &new);
    assert!(html.starts_with("<h3>Release notes</h3><hr>"), "got {html}");
    assert!(html.contains(
        r#"<div class="diff-block diff-modified" data-block-key="p">Fixed the <del>parser.</del><ins>lexer.</ins></div>"#
    ));
    assert!(html.contains(
        r#"<div class="diff-block diff-removed" data-block-key="q"><blockquote><p>Ship it</p><footer>Team</footer></blockquote></div>"#
    ));
    assert!(html.ends_with(
        r#"<div class="diff-block diff-added" data-block-key="c"><pre><code>cargo update</code></pre></div>"#
    ));
}

#[test]
fn test_unchanged_revision_has_no_markers() {
    let registry = builtin_registry();
    let html = Differ::new(&registry).diff(&first_revision(&registry), &first_revision(&registry));
    assert!(!html.contains("diff-block"), "got {html}");
}

#[test]
fn test_dispatcher_routes_documents_to_the_diff_engine() {
    let registry = Arc::new(builtin_registry());
    let mut dispatcher = CompareDispatcher::new();
    register(&mut dispatcher, registry.clone(), DiffOptions::default());

    let old = first_revision(&registry);
    let new = decode(&registry, json!([]));

    let html = dispatcher.compare(&old, &new).unwrap().unwrap();
    assert_eq!(html.matches("diff-removed").count(), 4);
    assert_eq!(dispatcher.compare(&"a", &"b").unwrap(), None);
}
