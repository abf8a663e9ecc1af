//! # cfgbind - Typed Configuration Binding
//!
//! A small, framework-agnostic library that locates, parses, and persists
//! structured configuration files on behalf of typed application models.
//! Applications declare *what* fields they need; cfgbind decides *where*
//! the file lives and *which* format it is in.
//!
//! ## Features
//!
//! - **Model Declaration**: bind a serde struct to a logical filename and,
//!   optionally, a nested section of the document
//! - **Format Handlers**: pluggable per-extension codecs; JSON built in,
//!   TOML and YAML behind the `toml`/`yaml` features
//! - **Ordered Search Roots**: multi-directory resolution with first-match
//!   precedence for both loading and saving
//! - **Section Merging**: saving a sectioned model preserves unrelated
//!   sections sharing the same file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cfgbind::{ConfigController, ConfigModel};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct ServerConfig {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl ConfigModel for ServerConfig {
//!     const FILENAME: &'static str = "server";
//! }
//!
//! let controller = ConfigController::new(["./config", "/etc/my-app"]);
//!
//! // Finds the first of ./config/server.{json,toml,yaml,...}, parses it,
//! // and constructs the model.
//! let mut config: ServerConfig = controller.load_config_for()?;
//!
//! config.port = 8080;
//! controller.save(&config)?;
//! # Ok::<(), cfgbind::Error>(())
//! ```
//!
//! ## Nested Sections
//!
//! Several models can share one file by declaring a `SECTION_KEY`:
//!
//! ```rust,no_run
//! use cfgbind::ConfigModel;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Database {
//!     url: String,
//! }
//!
//! impl ConfigModel for Database {
//!     const FILENAME: &'static str = "app";
//!     const SECTION_KEY: Option<&'static str> = Some("database");
//! }
//! ```
//!
//! Saving `Database` rewrites only the `database` section of `app.*`;
//! sibling sections are preserved.
//!
//! ## Adding a Format
//!
//! Implement [`ConfigHandler`] and register it:
//!
//! ```rust
//! use cfgbind::{ConfigController, HandlerRegistry, JsonHandler};
//! use std::sync::Arc;
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register(Arc::new(JsonHandler::new()));
//! // registry.register(Arc::new(MyIniHandler::new()));
//!
//! let controller = ConfigController::with_registry(["./config"], registry);
//! ```

// Core modules
mod controller;
mod error;
mod handler;
mod model;
mod registry;

// Built-in format handlers
pub mod handlers;

// Re-exports from core
pub use controller::ConfigController;
pub use error::{Error, Result};
pub use handler::{ConfigHandler, WritePayload};
pub use model::{ConfigModel, ModelBinding, SerializeModel};
pub use registry::HandlerRegistry;

// Built-in handler re-exports (feature-gated where optional)
pub use handlers::JsonHandler;
#[cfg(feature = "toml")]
pub use handlers::TomlHandler;
#[cfg(feature = "yaml")]
pub use handlers::YamlHandler;
