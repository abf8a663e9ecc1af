//! Built-in format handlers, one per supported extension

mod json;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

pub use json::JsonHandler;
#[cfg(feature = "toml")]
pub use toml::TomlHandler;
#[cfg(feature = "yaml")]
pub use yaml::YamlHandler;

use crate::error::{Error, Result};
use serde_json::Value;

/// Reject documents whose top level is not a mapping
pub(crate) fn ensure_mapping(value: Value, format: &'static str) -> Result<Value> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(Error::Parse {
            format,
            reason: "top-level value is not a mapping".into(),
        })
    }
}
