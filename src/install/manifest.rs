use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::config::{browsers, Family};
use super::paths::{manifest_dir, manifest_path, Scope};
use super::InstallError;

/// Name the extension passes to `chrome.runtime.connectNative`.
pub const HOST_NAME: &str = "com.perplexity.comet.share";
pub const HOST_DESCRIPTION: &str = "Perplexity Comet Share native messaging host";

/// Represents a native messaging manifest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Manifest {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
}

impl Manifest {
    /// Build the manifest a browser of `family` expects: each family reads
    /// only its own allowlist key.
    pub fn for_family(
        family: Family,
        name: &str,
        description: &str,
        exe_path: &Path,
        allowed_origins: &[String],
        allowed_extensions: &[String],
    ) -> Self {
        let (origins, extensions) = match family {
            Family::Chromium => (Some(allowed_origins.to_vec()), None),
            Family::Firefox => (None, Some(allowed_extensions.to_vec())),
        };
        Manifest {
            name: name.to_string(),
            description: description.to_string(),
            path: exe_path.to_path_buf(),
            ty: "stdio".to_string(),
            allowed_origins: origins,
            allowed_extensions: extensions,
        }
    }
}

fn check_exe_path(exe_path: &Path) -> Result<(), InstallError> {
    if cfg!(any(target_os = "linux", target_os = "macos")) && !exe_path.is_absolute() {
        return Err(InstallError::RelativeExePath(exe_path.to_path_buf()));
    }
    Ok(())
}

fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), InstallError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}

/// Installs the manifest for the given browsers.
///
/// On macOS and Linux `exe_path` must be absolute. Browsers are addressed
/// by their key in the embedded browser table (`"chrome"`, `"firefox"`, ...).
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use comet_share_host::install::{install, Scope, HOST_DESCRIPTION, HOST_NAME};
///
/// install(
///     HOST_NAME,
///     HOST_DESCRIPTION,
///     Path::new("/usr/local/bin/comet-share-host"),
///     &["chrome-extension://aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa/".to_string()],
///     &[],
///     &["chrome", "edge"],
///     Scope::User,
/// )
/// .expect("install manifest");
/// ```
pub fn install(
    host: &str,
    description: &str,
    exe_path: &Path,
    allowed_origins: &[String],
    allowed_extensions: &[String],
    browser_keys: &[&str],
    scope: Scope,
) -> Result<(), InstallError> {
    check_exe_path(exe_path)?;
    let table = browsers()?;

    for &browser in browser_keys {
        let family = table.browser(browser)?.family;
        let manifest = Manifest::for_family(
            family,
            host,
            description,
            exe_path,
            allowed_origins,
            allowed_extensions,
        );
        let path = manifest_path(browser, scope, host)?;
        write_manifest(&path, &manifest)?;

        #[cfg(all(windows, feature = "windows-registry"))]
        if let Ok(key) = super::paths::winreg_key_path(browser, scope, host) {
            super::winreg::write_manifest_reg(scope, &key, &path)?;
        }
    }
    Ok(())
}

fn installed_for(browser: &str, scope: Scope, host: &str) -> Result<bool, InstallError> {
    match manifest_path(browser, scope, host) {
        Ok(path) => registered(browser, scope, host, &path),
        Err(InstallError::Unsupported { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(not(all(windows, feature = "windows-registry")))]
fn registered(_browser: &str, _scope: Scope, _host: &str, path: &Path) -> Result<bool, InstallError> {
    Ok(path.exists())
}

/// On Windows the browser follows the registry, so the key must point at
/// an existing file.
#[cfg(all(windows, feature = "windows-registry"))]
fn registered(browser: &str, scope: Scope, host: &str, path: &Path) -> Result<bool, InstallError> {
    let key = match super::paths::winreg_key_path(browser, scope, host) {
        Ok(key) => key,
        Err(InstallError::Unsupported { .. }) => return Ok(path.exists()),
        Err(e) => return Err(e),
    };
    Ok(matches!(
        super::winreg::read_manifest_path_from_reg(scope, &key)?,
        Some(p) if p.exists()
    ))
}

/// Reports whether the manifest for `host` is installed for any of the
/// given browsers, or any configured browser when `browser_keys` is `None`.
///
/// # Examples
///
/// ```no_run
/// use comet_share_host::install::{verify_installed, Scope, HOST_NAME};
///
/// if verify_installed(HOST_NAME, Some(&["chrome"][..]), Scope::User).unwrap() {
///     eprintln!("registered");
/// }
/// ```
pub fn verify_installed(
    host: &str,
    browser_keys: Option<&[&str]>,
    scope: Scope,
) -> Result<bool, InstallError> {
    let table = browsers()?;
    let keys: Vec<&str> = match browser_keys {
        Some(keys) => keys.to_vec(),
        None => table.keys().collect(),
    };
    for browser in keys {
        table.browser(browser)?;
        if installed_for(browser, scope, host)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Removes the manifest for the given browsers. Missing manifests are
/// skipped.
pub fn remove(host: &str, browser_keys: &[&str], scope: Scope) -> Result<(), InstallError> {
    for &browser in browser_keys {
        let dir = match manifest_dir(browser, scope) {
            Ok(dir) => dir,
            Err(InstallError::Unsupported { .. }) => continue,
            Err(e) => return Err(e),
        };
        let file = dir.join(format!("{host}.json"));
        if file.exists() {
            fs::remove_file(file)?;
        }

        #[cfg(all(windows, feature = "windows-registry"))]
        if let Ok(key) = super::paths::winreg_key_path(browser, scope, host) {
            super::winreg::remove_manifest_reg(scope, &key)?;
        }
    }
    Ok(())
}
