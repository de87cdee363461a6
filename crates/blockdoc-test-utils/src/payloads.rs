//! Transport documents shared by test suites

use serde_json::{Value, json};

/// A header followed by a paragraph, neither with ids
pub fn header_and_paragraph() -> Value {
    json!({
        "time": 1,
        "blocks": [
            {"type": "header", "data": {"text": "Hi", "level": 2}},
            {"type": "paragraph", "data": {"text": "Body"}}
        ],
        "version": "1.0"
    })
}

/// Probe blocks with ids, one per text, in order
pub fn probe_document(texts: &[&str]) -> Value {
    let blocks: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "id": format!("b{i}"),
                "type": "probe",
                "data": {"text": text}
            })
        })
        .collect();
    json!({"time": 42, "blocks": blocks, "version": "test"})
}
