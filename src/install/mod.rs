//! Register the relay with browsers through native messaging manifests.

pub mod config;
pub mod manifest;
pub mod paths;

#[cfg(all(windows, feature = "windows-registry"))]
pub mod winreg;

use std::io;

pub use manifest::*;
pub use paths::*;

/// Errors raised while installing, verifying or removing a manifest.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("unknown browser `{0}`")]
    UnknownBrowser(String),

    /// The browser has no manifest location for this OS, or this scope.
    #[error("browser `{browser}` is not supported here (scope: {scope:?})")]
    Unsupported {
        browser: String,
        scope: Option<Scope>,
    },

    #[error("executable path must be absolute: {0}")]
    RelativeExePath(std::path::PathBuf),

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid browser table: {0}")]
    Config(String),

    #[error("manifest serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest I/O error: {0}")]
    Io(#[from] io::Error),
}
