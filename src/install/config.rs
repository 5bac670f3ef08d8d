//! The embedded browser table (`browsers.toml`).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::InstallError;

const EMBEDDED: &str = include_str!("browsers.toml");

static CONFIG: Lazy<Result<BrowsersConfig, String>> =
    Lazy::new(|| BrowsersConfig::parse(EMBEDDED).map_err(|e| e.to_string()));

/// Which manifest dialect a browser speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// `allowed_origins` allowlist.
    Chromium,
    /// `allowed_extensions` allowlist.
    Firefox,
}

/// Manifest locations for one operating system.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsLocations {
    pub user: Option<String>,
    pub system: Option<String>,
    /// Registry key root; Windows only.
    pub registry: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    pub family: Family,
    pub linux: Option<OsLocations>,
    pub macos: Option<OsLocations>,
    pub windows: Option<OsLocations>,
}

impl BrowserConfig {
    /// Locations for the OS this crate was built for.
    pub fn current_os(&self) -> Option<&OsLocations> {
        if cfg!(target_os = "macos") {
            self.macos.as_ref()
        } else if cfg!(windows) {
            self.windows.as_ref()
        } else {
            self.linux.as_ref()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowsersConfig {
    pub browsers: BTreeMap<String, BrowserConfig>,
}

impl BrowsersConfig {
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn browser(&self, key: &str) -> Result<&BrowserConfig, InstallError> {
        self.browsers
            .get(key)
            .ok_or_else(|| InstallError::UnknownBrowser(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.browsers.keys().map(String::as_str)
    }
}

/// The embedded table, parsed on first use.
pub fn browsers() -> Result<&'static BrowsersConfig, InstallError> {
    CONFIG
        .as_ref()
        .map_err(|e| InstallError::Config(e.clone()))
}
