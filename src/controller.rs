//! Controller: resolves model types to concrete files and performs load/save

use crate::error::{self, Error, Result};
use crate::handler::{ConfigHandler, WritePayload};
use crate::model::ConfigModel;
use crate::registry::HandlerRegistry;

use log::{debug, info};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// The first existing (root, extension) pair for a model's filename
///
/// Ephemeral: recomputed on every load and save, never cached, so saves stay
/// correct when files appear or disappear between calls.
struct ResolvedFile<'a> {
    path: PathBuf,
    handler: &'a dyn ConfigHandler,
}

/// Loads and saves [`ConfigModel`] types against an ordered list of search
/// roots.
///
/// Resolution probes every root in order, and within each root every
/// registered extension in registration order; the first existing file wins.
/// Earlier roots therefore take precedence both for loading and as the
/// default target when saving a model with no existing file.
///
/// All I/O is synchronous and blocking; each operation opens at most one
/// file at a time and releases it before returning. Saving the same path
/// from concurrent callers is not synchronized here, that discipline belongs
/// to the caller.
///
/// # Example
///
/// ```rust,no_run
/// use cfgbind::{ConfigController, ConfigModel};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct AppConfig {
///     key: String,
/// }
///
/// impl ConfigModel for AppConfig {
///     const FILENAME: &'static str = "app";
/// }
///
/// let controller = ConfigController::new(["."]);
/// let config: AppConfig = controller.load_config_for()?;
/// # Ok::<(), cfgbind::Error>(())
/// ```
pub struct ConfigController {
    /// Search roots, in precedence order
    roots: Vec<PathBuf>,
    registry: HandlerRegistry,
}

impl ConfigController {
    /// Create a controller over the given search roots with the built-in
    /// handler registry
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_registry(roots, HandlerRegistry::with_defaults())
    }

    /// Create a controller with a custom handler registry
    pub fn with_registry<I, P>(roots: I, registry: HandlerRegistry) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            registry,
        }
    }

    /// Create a controller with conventional roots for an application:
    /// the current directory, then the per-user config directory
    /// (e.g. `~/.config/{app_name}` on Linux)
    pub fn for_app(app_name: &str) -> Self {
        let mut roots =
            vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))];
        if let Some(dir) = dirs::config_dir() {
            roots.push(dir.join(app_name));
        }
        Self::new(roots)
    }

    /// The search roots, in precedence order
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// The handler registry backing this controller
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Find the first existing `root/{filename}.{extension}` candidate
    fn resolve(&self, filename: &str) -> Option<ResolvedFile<'_>> {
        for root in &self.roots {
            for (extension, handler) in self.registry.iter() {
                let candidate = root.join(format!("{filename}.{extension}"));
                if candidate.is_file() {
                    debug!("Resolved '{filename}' to '{}'", candidate.display());
                    return Some(ResolvedFile {
                        path: candidate,
                        handler,
                    });
                }
            }
        }
        None
    }

    /// Target for saving a model whose file does not exist yet: the first
    /// search root combined with the first write-capable registered extension
    fn default_target(&self, filename: &str) -> Result<ResolvedFile<'_>> {
        let not_found = || Error::NotFound {
            filename: filename.to_string(),
        };

        let root = self.roots.first().ok_or_else(not_found)?;
        if self.registry.is_empty() {
            return Err(not_found());
        }

        for (extension, handler) in self.registry.iter() {
            if handler.writable() {
                return Ok(ResolvedFile {
                    path: root.join(format!("{filename}.{extension}")),
                    handler,
                });
            }
        }

        // Every registered handler is read-only
        Err(Error::DependencyMissing {
            format: self.registry.extensions().next().unwrap_or("").to_string(),
            capability: "write",
        })
    }

    /// Load the configuration file declared by `M` and construct an instance
    ///
    /// Probes every root × extension pair in order; the first existing file
    /// is parsed by its extension's handler. When `M` declares a
    /// `SECTION_KEY`, only that section of the document is handed to the
    /// model's construction path.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] when no candidate file exists.
    /// * [`Error::SectionMissing`] when the declared section is absent.
    /// * Handler and model construction failures propagate unchanged.
    pub fn load_config_for<M: ConfigModel>(&self) -> Result<M> {
        let binding = M::binding();
        let resolved = self.resolve(binding.filename).ok_or_else(|| Error::NotFound {
            filename: binding.filename.to_string(),
        })?;

        let document = {
            let mut file = error::open_read(&resolved.path)?;
            resolved.handler.load(&mut file)?
        };

        let mapping = match binding.section_key {
            Some(section) => {
                document
                    .get(section)
                    .cloned()
                    .ok_or_else(|| Error::SectionMissing {
                        section: section.to_string(),
                        path: resolved.path.clone(),
                    })?
            }
            None => document,
        };

        let model = M::from_mapping(mapping)?;
        info!(
            "Loaded '{}' from '{}'",
            binding.filename,
            resolved.path.display()
        );
        Ok(model)
    }

    /// Serialize a model instance and write it back to its resolved file
    ///
    /// Resolution works exactly as in [`load_config_for`]; when no candidate
    /// file exists the first search root combined with the first
    /// write-capable registered extension becomes the target and the file is
    /// created there.
    ///
    /// A model without a `SECTION_KEY` owns its whole file: the document is
    /// overwritten with the model's serialization. A model with a
    /// `SECTION_KEY` owns only that section: the existing document is
    /// re-read, the model's section replaced, and sibling top-level keys
    /// preserved.
    ///
    /// # Errors
    ///
    /// * [`Error::DependencyMissing`] when the resolved handler cannot
    ///   write, or no registered handler can.
    /// * [`Error::UnsupportedInputType`] when the model does not serialize
    ///   to a mapping.
    /// * Filesystem and model serialization failures propagate unchanged.
    pub fn save<M: ConfigModel>(&self, model: &M) -> Result<()> {
        let binding = M::binding();
        let resolved = match self.resolve(binding.filename) {
            Some(resolved) => resolved,
            None => {
                let target = self.default_target(binding.filename)?;
                debug!(
                    "No existing file for '{}', creating '{}'",
                    binding.filename,
                    target.path.display()
                );
                target
            }
        };

        match binding.section_key {
            None => {
                let mut file = error::open_write(&resolved.path)?;
                resolved
                    .handler
                    .write(WritePayload::Model(model), &mut file)?;
            }
            Some(section) => {
                // Merge: replace this model's section, keep its siblings
                let mut document = match self.read_existing(&resolved)? {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                let mapping = WritePayload::Model(model).resolve()?;
                document.insert(section.to_string(), mapping);

                let document = Value::Object(document);
                let mut file = error::open_write(&resolved.path)?;
                resolved
                    .handler
                    .write(WritePayload::from(&document), &mut file)?;
            }
        }

        info!(
            "Saved '{}' to '{}'",
            binding.filename,
            resolved.path.display()
        );
        Ok(())
    }

    /// Read the current on-disk document for a resolved target, if any
    fn read_existing(&self, resolved: &ResolvedFile<'_>) -> Result<Option<Value>> {
        if !resolved.path.is_file() {
            return Ok(None);
        }
        let mut file = error::open_read(&resolved.path)?;
        resolved.handler.load(&mut file).map(Some)
    }
}
