//! Common test utilities for cfgbind integration tests
//!
//! Provides shared model declarations and filesystem helpers.

#![allow(dead_code)]

use cfgbind::ConfigModel;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// Test Models
// =============================================================================

/// Model owning a whole document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonModel {
    pub key: String,
}

impl ConfigModel for JsonModel {
    const FILENAME: &'static str = "example_json";
}

/// Model owning only the `data` section of its document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionedModel {
    pub name: String,
}

impl ConfigModel for SectionedModel {
    const FILENAME: &'static str = "example_toml";
    const SECTION_KEY: Option<&'static str> = Some("data");
}

/// Multi-field model for round-trip checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerModel {
    pub host: String,
    pub port: u16,
    pub verbose: bool,
}

impl ConfigModel for ServerModel {
    const FILENAME: &'static str = "server";
}

// =============================================================================
// Fixtures and Filesystem Helpers
// =============================================================================

/// Initialize test logging (safe to call from every test)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Write a configuration file under a search root
pub fn write_file(root: &Path, name: &str, content: &str) {
    std::fs::write(root.join(name), content).unwrap();
}

/// Read a configuration file back as a string
pub fn read_file(root: &Path, name: &str) -> String {
    std::fs::read_to_string(root.join(name)).unwrap()
}
