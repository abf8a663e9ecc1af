//! Error types for the cfgbind library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cfgbind operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the cfgbind library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    #[error("No configuration file named '{filename}.*' found in any search root")]
    NotFound { filename: String },

    #[error("Section '{section}' not present in '{path}'")]
    SectionMissing { section: String, path: PathBuf },

    // -------------------------------------------------------------------------
    // Handler Errors
    // -------------------------------------------------------------------------
    #[error("The {format} handler cannot {capability}: its backing dependency is unavailable")]
    DependencyMissing {
        format: String,
        capability: &'static str,
    },

    #[error("Cannot write {found} into a configuration file: expected a mapping or a value serializing to one")]
    UnsupportedInputType { found: String },

    #[error("Failed to parse {format} document: {reason}")]
    Parse {
        format: &'static str,
        reason: String,
    },

    #[error("Failed to serialize {format} document: {reason}")]
    Serialize {
        format: &'static str,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Model Errors
    // -------------------------------------------------------------------------
    #[error("Model construction failed: {0}")]
    Model(String),
}

impl Error {
    /// Check if this is a "no configuration file found" error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error reports a missing optional format dependency
    #[must_use]
    pub fn is_dependency_missing(&self) -> bool {
        matches!(self, Error::DependencyMissing { .. })
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns in the controller.

use std::fs::File;
use std::path::Path;

/// Open a file for reading with proper error handling
pub(crate) fn open_read(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Open (create or truncate) a file for writing with proper error handling
pub(crate) fn open_write(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
