//! TOML handler (requires the `toml` feature)

use crate::error::{Error, Result};
use crate::handler::{ConfigHandler, WritePayload};
use crate::handlers::ensure_mapping;
use serde_json::Value;
use std::io::{Read, Write};

/// TOML format handler
#[derive(Clone, Copy, Default)]
pub struct TomlHandler;

impl TomlHandler {
    /// Create a new TOML handler
    pub fn new() -> Self {
        Self
    }
}

impl ConfigHandler for TomlHandler {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn load(&self, reader: &mut dyn Read) -> Result<Value> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| Error::Parse {
            format: "TOML",
            reason: format!("stream read failed: {e}"),
        })?;

        let table: ::toml::Table = ::toml::from_str(&text).map_err(|e| Error::Parse {
            format: "TOML",
            reason: e.to_string(),
        })?;

        let value = serde_json::to_value(table).map_err(|e| Error::Parse {
            format: "TOML",
            reason: e.to_string(),
        })?;
        ensure_mapping(value, "TOML")
    }

    fn write(&self, payload: WritePayload<'_>, writer: &mut dyn Write) -> Result<()> {
        let document = payload.resolve()?;
        let text = ::toml::to_string_pretty(&document).map_err(|e| Error::Serialize {
            format: "TOML",
            reason: e.to_string(),
        })?;
        writer
            .write_all(text.as_bytes())
            .map_err(|e| Error::Serialize {
                format: "TOML",
                reason: format!("stream write failed: {e}"),
            })
    }

    fn supported(&self) -> bool {
        true
    }
}
