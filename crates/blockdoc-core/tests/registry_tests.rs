//! Tests for the feature registry and editor manifest

use std::sync::Arc;

use blockdoc_core::{EditorContext, FeatureKind, FeatureRegistration, FeatureRegistry};
use blockdoc_test_utils::{ClassTune, HookedTool, RecordingRouter, probe_registry};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn tuned_registry() -> FeatureRegistry {
    let mut registry = probe_registry(&["paragraph", "header"]);
    registry.register(FeatureRegistration::tune(ClassTune::new("alignment")));
    registry.register(FeatureRegistration::tune(ClassTune::new("variant")));
    registry.associate_tune("paragraph", "alignment");
    registry.associate_tune("header", "alignment");
    registry.associate_tune("paragraph", "variant");
    registry.mark_global_tune("variant");
    registry
}

#[test]
fn test_build_config_is_deterministic() {
    let registry = tuned_registry();
    let ctx = EditorContext::new("/editor");

    let first = registry.build_config(&ctx, &["header", "paragraph", "alignment"]);
    let second = registry.build_config(&ctx, &["header", "paragraph", "alignment"]);

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap().to_string(), second.to_json().unwrap().to_string());
}

#[test]
fn test_build_config_follows_requested_order() {
    let registry = tuned_registry();
    let config = registry.build_config(&EditorContext::new("/"), &["header", "paragraph"]);

    let names: Vec<&str> = config.tools.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["header", "paragraph"]);
    assert_eq!(config.tools["header"].class, "ProbeTool");
    assert_eq!(config.tools["header"].config, json!({"probe": "header"}));
}

#[test]
fn test_build_config_lists_only_active_tunes() {
    let registry = tuned_registry();
    let config = registry.build_config(&EditorContext::new("/"), &["paragraph", "alignment"]);

    assert_eq!(config.tools["paragraph"].tunes, vec!["alignment"]);
    assert!(config.tunes.is_empty());

    let manifest = config.to_json().unwrap();
    assert_eq!(manifest["tools"]["paragraph"]["tunes"], json!(["alignment"]));
    assert_eq!(manifest["tools"]["alignment"]["class"], json!("ClassTune"));
    assert_eq!(manifest["tunes"], json!([]));
}

#[test]
fn test_build_config_with_everything_active() {
    let registry = tuned_registry();
    let config = registry.build_config(&EditorContext::new("/"), &[] as &[&str]);

    let names: Vec<&str> = config.tools.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["paragraph", "header", "alignment", "variant"]);
    assert_eq!(config.tools["paragraph"].tunes, vec!["alignment", "variant"]);
    assert_eq!(config.tunes, vec!["variant"]);
    assert!(config.to_json().unwrap()["tools"]["alignment"].get("tunes").is_none());
}

#[test]
fn test_reregistering_replaces_in_place() {
    let mut registry = probe_registry(&["a", "b", "c"]);
    let previous = registry.register(FeatureRegistration::tune(ClassTune::new("b")));

    assert_eq!(previous.map(|reg| reg.kind()), Some(FeatureKind::Tool));
    assert_eq!(registry.names(), vec!["a", "b", "c"]);
    assert_eq!(registry.get("b").unwrap().kind(), FeatureKind::Tune);
}

#[test]
fn test_unregister_keeps_remaining_order() {
    let mut registry = probe_registry(&["a", "b", "c"]);
    assert!(registry.unregister("b").is_some());
    assert!(registry.unregister("b").is_none());
    assert_eq!(registry.names(), vec!["a", "c"]);
}

#[rstest]
#[case(&["c", "a"], vec!["c", "a"])]
#[case(&["a", "ghost", "b"], vec!["a", "b"])]
#[case(&[], vec!["a", "b", "c"])]
fn test_resolve(#[case] requested: &[&str], #[case] expected: Vec<&str>) {
    let registry = probe_registry(&["a", "b", "c"]);
    let resolved: Vec<&str> = registry.resolve(requested).iter().map(|r| r.name()).collect();
    assert_eq!(resolved, expected);
}

#[test]
fn test_media_merges_without_duplicates() {
    let registry = probe_registry(&["a", "b"]);

    let media = registry.media(&["b", "a", "b"]);
    assert_eq!(media.js, vec!["probe/b.js", "probe/a.js"]);
    assert!(media.css.is_empty());
}

#[test]
fn test_register_hook_runs_once_per_feature() {
    let hooked = Arc::new(HookedTool::new());
    let mut registry = probe_registry(&["paragraph"]);
    registry.register(FeatureRegistration::from_tool(hooked.clone()));

    let mut router = RecordingRouter::new();
    registry.register_routes(&mut router);
    registry.register_routes(&mut router);

    assert_eq!(hooked.side_effects(), 1);
    assert_eq!(router.paths(), vec!["/hooked/upload"]);
    assert_eq!(router.routes[0].method, "POST");
    assert_eq!(router.routes[0].name, "hooked-upload");
}
