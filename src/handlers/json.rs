//! JSON handler (always available)

use crate::error::{Error, Result};
use crate::handler::{ConfigHandler, WritePayload};
use crate::handlers::ensure_mapping;
use serde_json::Value;
use std::io::{Read, Write};

/// JSON format handler (default)
#[derive(Clone, Default)]
pub struct JsonHandler {
    /// Pretty print JSON output
    pretty: bool,
}

impl JsonHandler {
    /// Create a new JSON handler with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON handler (no pretty printing)
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl ConfigHandler for JsonHandler {
    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load(&self, reader: &mut dyn Read) -> Result<Value> {
        let value: Value = serde_json::from_reader(reader).map_err(|e| Error::Parse {
            format: "JSON",
            reason: e.to_string(),
        })?;
        ensure_mapping(value, "JSON")
    }

    fn write(&self, payload: WritePayload<'_>, writer: &mut dyn Write) -> Result<()> {
        let document = payload.resolve()?;
        let result = if self.pretty {
            serde_json::to_writer_pretty(writer, &document)
        } else {
            serde_json::to_writer(writer, &document)
        };
        result.map_err(|e| Error::Serialize {
            format: "JSON",
            reason: e.to_string(),
        })
    }

    fn supported(&self) -> bool {
        true
    }
}
