//! YAML handler (requires the `yaml` feature)

use crate::error::{Error, Result};
use crate::handler::{ConfigHandler, WritePayload};
use crate::handlers::ensure_mapping;
use serde_json::Value;
use std::io::{Read, Write};

/// YAML format handler
#[derive(Clone, Copy, Default)]
pub struct YamlHandler;

impl YamlHandler {
    /// Create a new YAML handler
    pub fn new() -> Self {
        Self
    }
}

impl ConfigHandler for YamlHandler {
    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn load(&self, reader: &mut dyn Read) -> Result<Value> {
        let value: Value = serde_yaml::from_reader(reader).map_err(|e| Error::Parse {
            format: "YAML",
            reason: e.to_string(),
        })?;
        ensure_mapping(value, "YAML")
    }

    fn write(&self, payload: WritePayload<'_>, writer: &mut dyn Write) -> Result<()> {
        let document = payload.resolve()?;
        serde_yaml::to_writer(writer, &document).map_err(|e| Error::Serialize {
            format: "YAML",
            reason: e.to_string(),
        })
    }

    fn supported(&self) -> bool {
        true
    }
}
