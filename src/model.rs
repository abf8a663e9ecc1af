//! Model declaration: binding a typed struct to a configuration file

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Declaration record attached to a model type
///
/// Produced by [`ConfigModel::binding`]; consumed by the controller during
/// resolution. One record per model type, fixed at type-definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelBinding {
    /// Logical base name of the configuration file, without extension
    pub filename: &'static str,

    /// Key of the nested section this model is constructed from
    ///
    /// `None` means the whole document is the model's data.
    pub section_key: Option<&'static str>,
}

/// Trait for application-defined configuration models
///
/// A model declares which logical file it lives in (`FILENAME`) and,
/// optionally, which nested section of that file it owns (`SECTION_KEY`).
/// Construction and serialization default to serde but remain the model's
/// own contract: override [`from_mapping`](ConfigModel::from_mapping) or
/// [`to_mapping`](ConfigModel::to_mapping) to enforce stricter rules or
/// apply defaults.
///
/// # Example
///
/// ```rust
/// use cfgbind::ConfigModel;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Database {
///     url: String,
/// }
///
/// impl ConfigModel for Database {
///     const FILENAME: &'static str = "app";
///     const SECTION_KEY: Option<&'static str> = Some("database");
/// }
/// ```
pub trait ConfigModel: Serialize + DeserializeOwned {
    /// Logical base name of the configuration file, without extension
    const FILENAME: &'static str;

    /// Nested section of the document this model owns (default: the whole
    /// document)
    const SECTION_KEY: Option<&'static str> = None;

    /// Assemble the declaration record for this model type
    fn binding() -> ModelBinding {
        ModelBinding {
            filename: Self::FILENAME,
            section_key: Self::SECTION_KEY,
        }
    }

    /// Construct an instance from the mapping recovered from the file
    ///
    /// # Errors
    ///
    /// The default implementation fails with [`Error::Model`] when the
    /// mapping does not deserialize into `Self`.
    fn from_mapping(document: Value) -> Result<Self> {
        serde_json::from_value(document).map_err(|e| Error::Model(e.to_string()))
    }

    /// Serialize this instance into a mapping for persistence
    ///
    /// # Errors
    ///
    /// The default implementation fails with [`Error::Model`] when the
    /// instance does not serialize.
    fn to_mapping(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::Model(e.to_string()))
    }
}

/// Object-safe serialization facet of [`ConfigModel`]
///
/// Handlers accept this in [`WritePayload::Model`] so they can serialize any
/// model without knowing its concrete type.
///
/// [`WritePayload::Model`]: crate::handler::WritePayload::Model
pub trait SerializeModel {
    /// Serialize into a mapping
    fn to_mapping(&self) -> Result<Value>;
}

impl<M: ConfigModel> SerializeModel for M {
    fn to_mapping(&self) -> Result<Value> {
        ConfigModel::to_mapping(self)
    }
}
