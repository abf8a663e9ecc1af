//! Controller Integration Tests
//!
//! Tests for the resolution and load/save lifecycle:
//! - Loading concrete files into models
//! - Search root precedence
//! - Section extraction and merge-on-save
//! - Error taxonomy (not found, missing section, degraded handlers)

mod common;

use cfgbind::{
    ConfigController, ConfigHandler, ConfigModel, Error, HandlerRegistry, JsonHandler, Result,
    WritePayload,
};
use common::{read_file, write_file, JsonModel, SectionedModel, ServerModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Read, Write};
use std::sync::Arc;
use tempfile::TempDir;

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_concrete_json_scenario() {
    common::init_logging();
    let root = TempDir::new().unwrap();
    write_file(root.path(), "example_json.json", r#"{"key": "value"}"#);

    let controller = ConfigController::new([root.path()]);
    let model: JsonModel = controller.load_config_for().unwrap();

    assert_eq!(model.key, "value");
}

#[test]
fn test_load_missing_file_fails_with_not_found() {
    let root = TempDir::new().unwrap();
    let controller = ConfigController::new([root.path()]);

    let err = controller.load_config_for::<JsonModel>().unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_search_precedence_first_root_wins() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_file(first.path(), "example_json.json", r#"{"key": "from-a"}"#);
    write_file(second.path(), "example_json.json", r#"{"key": "from-b"}"#);

    let controller = ConfigController::new([first.path(), second.path()]);
    let model: JsonModel = controller.load_config_for().unwrap();

    assert_eq!(model.key, "from-a");
}

#[test]
fn test_load_falls_through_to_later_root() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_file(second.path(), "example_json.json", r#"{"key": "from-b"}"#);

    let controller = ConfigController::new([first.path(), second.path()]);
    let model: JsonModel = controller.load_config_for().unwrap();

    assert_eq!(model.key, "from-b");
}

#[test]
fn test_load_section_missing() {
    let root = TempDir::new().unwrap();
    // SectionedModel expects a "data" section
    write_file(root.path(), "example_toml.json", r#"{"other": {}}"#);

    let controller = ConfigController::new([root.path()]);
    let err = controller.load_config_for::<SectionedModel>().unwrap_err();

    match err {
        Error::SectionMissing { section, .. } => assert_eq!(section, "data"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_model_construction_failure_propagates() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), "example_json.json", r#"{"wrong_field": 1}"#);

    let controller = ConfigController::new([root.path()]);
    let err = controller.load_config_for::<JsonModel>().unwrap_err();

    assert!(matches!(err, Error::Model(_)));
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn test_save_then_reload_concrete_scenario() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), "example_json.json", r#"{"key": "value"}"#);

    let controller = ConfigController::new([root.path()]);
    let changed = JsonModel {
        key: "new_value".into(),
    };
    controller.save(&changed).unwrap();

    let reloaded: JsonModel = controller.load_config_for().unwrap();
    assert_eq!(reloaded.key, "new_value");
}

#[test]
fn test_save_without_existing_file_creates_default_target() {
    let root = TempDir::new().unwrap();
    let controller = ConfigController::new([root.path()]);

    let model = ServerModel {
        host: "localhost".into(),
        port: 8080,
        verbose: false,
    };
    controller.save(&model).unwrap();

    // First root, first registered extension
    assert!(root.path().join("server.json").is_file());
    let reloaded: ServerModel = controller.load_config_for().unwrap();
    assert_eq!(reloaded, model);
}

#[test]
fn test_roundtrip_multi_field_model() {
    let root = TempDir::new().unwrap();
    let controller = ConfigController::new([root.path()]);

    let model = ServerModel {
        host: "0.0.0.0".into(),
        port: 443,
        verbose: true,
    };
    controller.save(&model).unwrap();
    let reloaded: ServerModel = controller.load_config_for().unwrap();

    assert_eq!(reloaded, model);
}

#[test]
fn save_preserves_sibling_sections() {
    let root = TempDir::new().unwrap();
    write_file(
        root.path(),
        "example_toml.json",
        r#"{"data": {"name": "bob"}, "unrelated": {"keep": true}}"#,
    );

    let controller = ConfigController::new([root.path()]);
    let model = SectionedModel {
        name: "alice".into(),
    };
    controller.save(&model).unwrap();

    let content = read_file(root.path(), "example_toml.json");
    let doc: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["data"]["name"], "alice");
    assert_eq!(doc["unrelated"]["keep"], true);
}

#[test]
fn save_without_section_overwrites_file() {
    let root = TempDir::new().unwrap();
    write_file(
        root.path(),
        "example_json.json",
        r#"{"key": "old", "stale": "gone"}"#,
    );

    let controller = ConfigController::new([root.path()]);
    let model = JsonModel { key: "new".into() };
    controller.save(&model).unwrap();

    let content = read_file(root.path(), "example_json.json");
    let doc: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["key"], "new");
    assert!(doc.get("stale").is_none());
}

#[test]
fn test_sectioned_save_creates_new_file() {
    let root = TempDir::new().unwrap();
    let controller = ConfigController::new([root.path()]);

    let model = SectionedModel { name: "bob".into() };
    controller.save(&model).unwrap();

    let reloaded: SectionedModel = controller.load_config_for().unwrap();
    assert_eq!(reloaded.name, "bob");
}

// =============================================================================
// Degraded Handlers
// =============================================================================

/// JSON-syntax handler that can load but not write, as when a format's
/// serialization backend is an optional dependency that is absent
struct ReadOnlyHandler;

impl ConfigHandler for ReadOnlyHandler {
    fn extensions(&self) -> &[&str] {
        &["cfg"]
    }

    fn load(&self, reader: &mut dyn Read) -> Result<Value> {
        JsonHandler::new().load(reader)
    }

    fn write(&self, _payload: WritePayload<'_>, _writer: &mut dyn Write) -> Result<()> {
        Err(Error::DependencyMissing {
            format: "cfg".into(),
            capability: "write",
        })
    }

    fn supported(&self) -> bool {
        true
    }

    fn writable(&self) -> bool {
        false
    }
}

#[derive(Serialize, Deserialize)]
struct CfgModel {
    key: String,
}

impl ConfigModel for CfgModel {
    const FILENAME: &'static str = "example_cfg";
}

#[test]
fn test_read_capable_write_incapable_handler() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), "example_cfg.cfg", r#"{"key": "value"}"#);

    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(ReadOnlyHandler));
    let controller = ConfigController::with_registry([root.path()], registry);

    // Load through the registered handler still works
    let model: CfgModel = controller.load_config_for().unwrap();
    assert_eq!(model.key, "value");

    // Save resolves to the same handler and fails, no fallback is attempted
    let err = controller.save(&model).unwrap_err();
    assert!(err.is_dependency_missing());
}

#[test]
fn test_default_target_skips_unwritable_extension() {
    let root = TempDir::new().unwrap();

    // Read-only handler registered first, JSON second
    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(ReadOnlyHandler));
    registry.register(Arc::new(JsonHandler::new()));
    let controller = ConfigController::with_registry([root.path()], registry);

    let model = CfgModel { key: "v".into() };
    controller.save(&model).unwrap();

    // The unwritable "cfg" extension is skipped for new files
    assert!(!root.path().join("example_cfg.cfg").exists());
    assert!(root.path().join("example_cfg.json").is_file());
}

#[test]
fn test_no_write_capable_handler_at_all() {
    let root = TempDir::new().unwrap();

    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(ReadOnlyHandler));
    let controller = ConfigController::with_registry([root.path()], registry);

    let model = CfgModel { key: "v".into() };
    let err = controller.save(&model).unwrap_err();
    assert!(err.is_dependency_missing());
}

// =============================================================================
// Serialization Contract
// =============================================================================

/// Model whose custom serialization breaks the mapping contract
#[derive(Serialize, Deserialize)]
struct ScalarModel(String);

impl ConfigModel for ScalarModel {
    const FILENAME: &'static str = "scalar";
}

#[test]
fn test_non_mapping_model_fails_with_unsupported_input() {
    let root = TempDir::new().unwrap();
    let controller = ConfigController::new([root.path()]);

    // A newtype over a string serializes to a bare string, not a mapping
    let err = controller.save(&ScalarModel("oops".into())).unwrap_err();
    assert!(matches!(err, Error::UnsupportedInputType { .. }));
}
