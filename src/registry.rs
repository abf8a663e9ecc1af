//! Handler registry: extension to handler lookup, built once at startup

use crate::handler::ConfigHandler;
use crate::handlers::JsonHandler;
#[cfg(feature = "toml")]
use crate::handlers::TomlHandler;
#[cfg(feature = "yaml")]
use crate::handlers::YamlHandler;

use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

/// Mapping from file extension to the handler responsible for it
///
/// Built once at startup and read-only afterwards. Each candidate handler is
/// probed with [`ConfigHandler::supported`] at registration time; handlers
/// whose probe fails are skipped entirely, so their extensions stay free.
///
/// Extension lookups are normalized to lowercase. Registering a handler for
/// an already-claimed extension overwrites the earlier mapping (last wins),
/// but the extension keeps its original position in the probe order, so the
/// order in which the controller tries candidate filenames stays stable.
pub struct HandlerRegistry {
    by_extension: HashMap<String, Arc<dyn ConfigHandler>>,
    /// Probe order: extensions in first-registration order
    order: Vec<String>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry populated with the built-in handlers
    ///
    /// Handlers are registered in declaration order: JSON, then TOML and
    /// YAML when their features are compiled in.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonHandler::new()));
        #[cfg(feature = "toml")]
        registry.register(Arc::new(TomlHandler::new()));
        #[cfg(feature = "yaml")]
        registry.register(Arc::new(YamlHandler::new()));

        info!(
            "Handler registry initialized with extensions: {:?}",
            registry.order
        );
        registry
    }

    /// Register a handler for all of its claimed extensions
    ///
    /// Returns `false` (and registers nothing) when the handler's
    /// availability probe fails.
    pub fn register(&mut self, handler: Arc<dyn ConfigHandler>) -> bool {
        if !handler.supported() {
            debug!(
                "Skipping handler for {:?}: availability probe failed",
                handler.extensions()
            );
            return false;
        }

        for extension in handler.extensions() {
            let extension = extension.to_ascii_lowercase();
            if self
                .by_extension
                .insert(extension.clone(), Arc::clone(&handler))
                .is_some()
            {
                debug!("Extension '{extension}' re-registered, last registration wins");
            } else {
                self.order.push(extension);
            }
        }
        true
    }

    /// Look up the handler responsible for an extension
    ///
    /// Lookup is case-insensitive (normalized to lowercase).
    pub fn handler_for(&self, extension: &str) -> Option<&dyn ConfigHandler> {
        self.by_extension
            .get(&extension.to_ascii_lowercase())
            .map(Arc::as_ref)
    }

    /// All registered extensions, in probe order
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Registered (extension, handler) pairs, in probe order
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &dyn ConfigHandler)> {
        self.order.iter().filter_map(|extension| {
            self.by_extension
                .get(extension)
                .map(|handler| (extension.as_str(), handler.as_ref()))
        })
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no extension is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
