//! End-to-end decode, render, and persistence scenarios over the built-in
//! features.

use std::sync::Arc;

use blockdoc_core::{
    Document, DocumentData, DocumentField, EngineConfig, RenderContext, StorageValue,
};
use blockdoc_features::builtin_registry;
use blockdoc_test_utils::payloads;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_header_and_paragraph_decode_and_render() {
    let registry = builtin_registry();
    let source = payloads::header_and_paragraph().to_string();

    let doc = Document::from_json(&registry, &["header", "paragraph"], &source).unwrap();

    let types: Vec<&str> = doc.iter().map(|b| b.block_type()).collect();
    assert_eq!(types, vec!["header", "paragraph"]);
    assert_eq!(doc.time, 1);
    assert_eq!(doc.version, "1.0");

    let html = doc.render(&registry, &RenderContext::new());
    assert!(html.contains("<h2"), "got {html}");
    assert!(html.contains("Body"), "got {html}");
    assert_eq!(html, "<h2>Hi</h2><p>Body</p>");
}

#[test]
fn test_inactive_header_is_dropped_silently() {
    let registry = builtin_registry();
    let source = payloads::header_and_paragraph().to_string();

    let doc = Document::from_json(&registry, &["paragraph"], &source).unwrap();

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.blocks()[0].block_type(), "paragraph");
}

#[test]
fn test_validation_failure_returns_no_document() {
    let registry = builtin_registry();
    let source = json!({
        "blocks": [
            {"type": "paragraph", "data": {"text": "fine"}},
            {"type": "header", "data": {"text": "bad", "level": 9}}
        ]
    })
    .to_string();

    let err = Document::from_json(&registry, &[] as &[&str], &source).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("header"));
}

#[test]
fn test_field_persists_through_storage_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blockdoc.toml");
    std::fs::write(
        &path,
        "[render]\ndebug = true\n\n[features]\nactive = [\"header\", \"paragraph\", \"alignment\"]\n",
    )
    .unwrap();
    let config = EngineConfig::load(&path).unwrap();

    let registry = Arc::new(builtin_registry());
    let mut field = DocumentField::from_config(registry.clone(), &config);

    let submitted = json!({
        "time": 1700000000000i64,
        "blocks": [
            {"id": "h", "type": "header", "data": {"text": "Title", "level": 1}},
            {"id": "c", "type": "code", "data": {"code": "x"}},
            {"id": "p", "type": "paragraph", "data": {"text": "Body"}, "tunes": {"alignment": "center"}}
        ],
        "version": "2.30.7"
    })
    .to_string();
    let doc = field.clean(&submitted).unwrap();
    field.set_value(doc);
    let stored = field.to_storage().unwrap().unwrap();

    let mut reloaded = DocumentField::from_config(registry.clone(), &config);
    reloaded.scan(StorageValue::Bytes(stored.clone().into_bytes())).unwrap();
    let doc = reloaded.value().unwrap();

    let ids: Vec<&str> = doc.iter().map(|b| b.id()).collect();
    assert_eq!(ids, vec!["h", "p"]);
    assert_eq!(
        doc.render(&registry, &RenderContext::from_config(&config.render)),
        r#"<h1>Title</h1><p class="text-center">Body</p>"#
    );
    assert_eq!(reloaded.to_storage().unwrap().as_deref(), Some(stored.as_str()));

    let data = DocumentData::from_json(&stored).unwrap();
    assert_eq!(data.time, 1_700_000_000_000);
    assert_eq!(data.blocks[1].tunes["alignment"], json!("center"));
}

#[test]
fn test_unregistered_feature_drops_blocks_on_save() {
    let mut registry = builtin_registry();
    let source = json!({
        "blocks": [
            {"id": "a", "type": "paragraph", "data": {"text": "kept"}},
            {"id": "b", "type": "delimiter", "data": {}}
        ]
    })
    .to_string();
    let doc = Document::from_json(&registry, &[] as &[&str], &source).unwrap();
    assert_eq!(doc.len(), 2);

    registry.unregister("delimiter");
    let encoded = doc.encode(&registry);

    let ids: Vec<&str> = encoded.blocks.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}
