//! Format handler trait and the write-payload dispatch

use crate::error::{Error, Result};
use crate::model::SerializeModel;
use serde_json::Value;
use std::io::{Read, Write};

/// Trait for per-format codec implementations
///
/// One handler is responsible for one or more file extensions. Handlers are
/// constructed once at registry build time and are immutable afterwards, so
/// implementations should be cheap stateless structs.
///
/// A handler may be readable without being writable: [`supported`] gates
/// registry inclusion (can this handler `load` at all?), while [`writable`]
/// is probed independently so that a read-only handler keeps its extensions
/// reserved and loadable even though [`write`] reports
/// [`Error::DependencyMissing`].
///
/// [`supported`]: ConfigHandler::supported
/// [`writable`]: ConfigHandler::writable
/// [`write`]: ConfigHandler::write
pub trait ConfigHandler: Send + Sync {
    /// File extensions this handler claims, lowercase, without the dot
    fn extensions(&self) -> &[&str];

    /// Parse a byte stream into a key-ordered mapping
    ///
    /// The returned value is always a `Value::Object`; key order is preserved
    /// for formats where it is meaningful.
    fn load(&self, reader: &mut dyn Read) -> Result<Value>;

    /// Serialize a payload into the handler's format
    ///
    /// Accepts either a parsed document or anything exposing the
    /// [`SerializeModel`] contract; any payload that does not resolve to a
    /// top-level mapping fails with [`Error::UnsupportedInputType`].
    fn write(&self, payload: WritePayload<'_>, writer: &mut dyn Write) -> Result<()>;

    /// Whether this handler can currently perform at least `load`
    ///
    /// Probed once at registration time; handlers reporting `false` are not
    /// registered at all.
    fn supported(&self) -> bool;

    /// Whether this handler can currently perform `write`
    ///
    /// Independent of [`supported`](ConfigHandler::supported): a handler may
    /// stay registered for reading while its serialization backend is absent.
    fn writable(&self) -> bool {
        true
    }
}

/// Value accepted by [`ConfigHandler::write`]
///
/// This is the dispatch over the two kinds of writable input: an already
/// parsed document, or a model carrying its own serialization contract.
pub enum WritePayload<'a> {
    /// A parsed document; must be a mapping at the top level
    Document(&'a Value),
    /// Any value that can serialize itself into a mapping
    Model(&'a dyn SerializeModel),
}

impl WritePayload<'_> {
    /// Resolve the payload into the document to be written
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedInputType`] if the payload is not a
    /// mapping at the top level, and propagates model serialization failures.
    pub fn resolve(self) -> Result<Value> {
        let value = match self {
            WritePayload::Document(value) => value.clone(),
            WritePayload::Model(model) => model.to_mapping()?,
        };

        if value.is_object() {
            Ok(value)
        } else {
            Err(Error::UnsupportedInputType {
                found: value_kind(&value).to_string(),
            })
        }
    }
}

impl<'a> From<&'a Value> for WritePayload<'a> {
    fn from(value: &'a Value) -> Self {
        WritePayload::Document(value)
    }
}

/// Human-readable kind of a JSON value, for error messages
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_document_mapping() {
        let doc = json!({"key": "value"});
        let resolved = WritePayload::Document(&doc).resolve().unwrap();
        assert_eq!(resolved, doc);
    }

    #[test]
    fn test_resolve_rejects_non_mapping() {
        let doc = json!(["a", "b"]);
        let err = WritePayload::Document(&doc).resolve().unwrap_err();
        match err {
            Error::UnsupportedInputType { found } => assert_eq!(found, "an array"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_value_ref_builds_document_payload() {
        let doc = json!({"key": "value"});
        let payload = WritePayload::from(&doc);
        assert!(matches!(payload, WritePayload::Document(_)));
        assert_eq!(payload.resolve().unwrap(), doc);
    }

    #[test]
    fn test_resolve_rejects_scalar() {
        let doc = json!(42);
        let err = WritePayload::Document(&doc).resolve().unwrap_err();
        assert!(matches!(err, Error::UnsupportedInputType { .. }));
    }
}
