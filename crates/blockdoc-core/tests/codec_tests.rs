//! Tests for Document::decode / Document::encode

use blockdoc_core::{
    BlockData, Document, DocumentData, Error, FeatureRegistration, FeatureRegistry,
};
use blockdoc_test_utils::{ClassTune, ProbeTool, WrapTune, payloads, probe_registry};
use pretty_assertions::assert_eq;
use serde_json::json;

fn decode(registry: &FeatureRegistry, active: &[&str], value: serde_json::Value) -> blockdoc_core::Result<Document> {
    let data: DocumentData = serde_json::from_value(value).unwrap();
    Document::decode(registry, active, data)
}

fn types(doc: &Document) -> Vec<&str> {
    doc.iter().map(|b| b.block_type()).collect()
}

#[test]
fn test_decode_preserves_block_order_and_metadata() {
    let registry = probe_registry(&["probe"]);
    let doc = decode(&registry, &[], payloads::probe_document(&["one", "two", "three"])).unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.time, 42);
    assert_eq!(doc.version, "test");
    let ids: Vec<_> = doc.iter().map(|b| b.id()).collect();
    assert_eq!(ids, vec!["b0", "b1", "b2"]);
}

#[test]
fn test_decode_skips_unknown_block_types() {
    let registry = probe_registry(&["paragraph"]);
    let doc = decode(&registry, &[], payloads::header_and_paragraph()).unwrap();

    assert_eq!(types(&doc), vec!["paragraph"]);
}

#[test]
fn test_decode_skips_registered_but_inactive_types() {
    let registry = probe_registry(&["header", "paragraph"]);
    let doc = decode(&registry, &["paragraph"], payloads::header_and_paragraph()).unwrap();

    assert_eq!(types(&doc), vec!["paragraph"]);
    assert_eq!(doc.features(), ["paragraph"]);
}

#[test]
fn test_decode_aborts_on_validation_failure() {
    let registry = probe_registry(&["probe"]);
    let payload = json!({
        "time": 1,
        "blocks": [
            {"type": "probe", "data": {"text": "fine"}},
            {"type": "probe", "data": {"text": "bad", "invalid": true}},
            {"type": "probe", "data": {"text": "never reached"}}
        ],
        "version": "1"
    });

    let err = decode(&registry, &[], payload).unwrap_err();
    assert!(err.is_validation(), "expected validation error, got {err:?}");
}

#[test]
fn test_decode_rejects_non_tool_block_type() {
    let mut registry = probe_registry(&["probe"]);
    registry.register(FeatureRegistration::tune(ClassTune::new("alignment")));
    let payload = json!({
        "blocks": [{"type": "alignment", "data": {}}]
    });

    let err = decode(&registry, &[], payload).unwrap_err();
    assert!(matches!(err, Error::Structural { ref feature, .. } if feature == "alignment"));
}

#[test]
fn test_tunes_apply_in_sorted_name_order() {
    let mut registry = probe_registry(&["probe"]);
    registry.register(FeatureRegistration::tune(ClassTune::new("zeta")));
    registry.register(FeatureRegistration::tune(ClassTune::new("alpha")));
    let payload = json!({
        "blocks": [{
            "type": "probe",
            "data": {"text": "x"},
            "tunes": {"zeta": {}, "alpha": {}}
        }]
    });

    let doc = decode(&registry, &[], payload).unwrap();
    let attrs = doc.blocks()[0].attributes();
    assert_eq!(attrs.classes(), ["tuned-alpha", "tuned-zeta"]);
    assert_eq!(attrs.get("data-last-tune"), Some("zeta"));
}

#[test]
fn test_unknown_tunes_are_skipped() {
    let mut registry = probe_registry(&["probe"]);
    registry.register(FeatureRegistration::tune(ClassTune::new("known")));
    let payload = json!({
        "blocks": [{
            "type": "probe",
            "data": {"text": "x"},
            "tunes": {"missing": {"anything": 1}, "known": {}}
        }]
    });

    let doc = decode(&registry, &[], payload).unwrap();
    assert_eq!(doc.blocks()[0].attributes().classes(), ["tuned-known"]);
}

#[test]
fn test_tune_validation_failure_aborts_decode() {
    let mut registry = probe_registry(&["probe"]);
    registry.register(FeatureRegistration::tune(ClassTune::new("strict")));
    let payload = json!({
        "blocks": [{
            "type": "probe",
            "data": {"text": "x"},
            "tunes": {"strict": {"reject": true}}
        }]
    });

    let err = decode(&registry, &[], payload).unwrap_err();
    assert!(matches!(err, Error::Validation { ref feature, .. } if feature == "strict"));
}

#[test]
fn test_tool_used_as_tune_is_structural_error() {
    let registry = probe_registry(&["probe", "other"]);
    let payload = json!({
        "blocks": [{"type": "probe", "data": {}, "tunes": {"other": {}}}]
    });

    let err = decode(&registry, &[], payload).unwrap_err();
    assert!(matches!(err, Error::Structural { .. }));
}

#[test]
fn test_wrapping_tune_keeps_identity_and_data() {
    let mut registry = probe_registry(&["probe"]);
    registry.register(FeatureRegistration::tune(WrapTune::new("frame")));
    let payload = json!({
        "blocks": [{"id": "w1", "type": "probe", "data": {"text": "x"}, "tunes": {"frame": true}}]
    });

    let doc = decode(&registry, &[], payload).unwrap();
    let block = &doc.blocks()[0];
    assert_eq!(block.id(), "w1");
    assert_eq!(block.feature(), "probe");
    assert_eq!(block.data().tunes.get("frame"), Some(&json!(true)));
}

#[test]
fn test_encode_round_trips_tunes_and_data() {
    let mut registry = probe_registry(&["probe"]);
    registry.register(FeatureRegistration::tune(ClassTune::new("alignment")));
    let source = r#"{"time":7,"blocks":[{"id":"a","type":"probe","data":{"text":"x"},"tunes":{"alignment":{"alignment":"center"}}}],"version":"2"}"#;

    let doc = Document::from_json(&registry, &[] as &[&str], source).unwrap();
    let encoded = doc.encode(&registry);

    assert_eq!(encoded.time, 7);
    assert_eq!(encoded.version, "2");
    assert_eq!(
        encoded.blocks,
        vec![BlockData::new("probe")
            .with_id("a")
            .with_data("text", "x")
            .with_tune("alignment", json!({"alignment": "center"}))]
    );
}

#[test]
fn test_encode_drops_blocks_of_unregistered_features() {
    let mut registry = probe_registry(&["header", "paragraph"]);
    let doc = decode(&registry, &[], payloads::header_and_paragraph()).unwrap();
    assert_eq!(doc.len(), 2);

    registry.unregister("header");
    let encoded = doc.encode(&registry);

    let encoded_types: Vec<_> = encoded.blocks.iter().map(|b| b.block_type.as_str()).collect();
    assert_eq!(encoded_types, vec!["paragraph"]);
}

#[test]
fn test_encode_respects_document_scope() {
    let registry = probe_registry(&["header", "paragraph"]);
    let mut doc = Document::new().with_features(&["paragraph"]);
    doc.push(
        blockdoc_core::Tool::render(&ProbeTool::new("header"), BlockData::new("header")).unwrap(),
    );
    doc.push(
        blockdoc_core::Tool::render(&ProbeTool::new("paragraph"), BlockData::new("paragraph"))
            .unwrap(),
    );

    let encoded = doc.encode(&registry);
    assert_eq!(encoded.blocks.len(), 1);
    assert_eq!(encoded.blocks[0].block_type, "paragraph");
}

#[test]
fn test_from_json_reports_malformed_input() {
    let registry = probe_registry(&["probe"]);
    let err = Document::from_json(&registry, &[] as &[&str], "{not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}
