//! Resolve manifest locations from the browser table.

use std::env;
use std::path::PathBuf;

use super::config::{browsers, OsLocations};
use super::InstallError;

/// Who the manifest is installed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The current user's profile. No elevated privileges needed.
    #[default]
    User,
    /// Every user on the machine.
    System,
}

const PLACEHOLDERS: [&str; 4] = ["HOME", "APPDATA", "LOCALAPPDATA", "PROGRAMDATA"];

/// Replace `{VAR}` placeholders with the matching environment variables.
fn expand(template: &str) -> Result<PathBuf, InstallError> {
    let mut out = template.to_string();
    for var in PLACEHOLDERS {
        let token = format!("{{{var}}}");
        if out.contains(&token) {
            let value = env::var(var).map_err(|_| InstallError::MissingEnv(var))?;
            out = out.replace(&token, &value);
        }
    }
    Ok(PathBuf::from(out))
}

fn locations(browser: &str) -> Result<&'static OsLocations, InstallError> {
    browsers()?
        .browser(browser)?
        .current_os()
        .ok_or_else(|| InstallError::Unsupported {
            browser: browser.to_string(),
            scope: None,
        })
}

/// Directory holding `browser`'s manifests for `scope` on this OS.
pub fn manifest_dir(browser: &str, scope: Scope) -> Result<PathBuf, InstallError> {
    let loc = locations(browser)?;
    let template = match scope {
        Scope::User => loc.user.as_deref(),
        Scope::System => loc.system.as_deref(),
    };
    let template = template.ok_or_else(|| InstallError::Unsupported {
        browser: browser.to_string(),
        scope: Some(scope),
    })?;
    expand(template)
}

/// Full path of the manifest file for `host`.
pub fn manifest_path(browser: &str, scope: Scope, host: &str) -> Result<PathBuf, InstallError> {
    Ok(manifest_dir(browser, scope)?.join(format!("{host}.json")))
}

/// Registry key that points the browser at the manifest for `host`.
///
/// Only browsers with a `registry` entry for Windows have one.
pub fn winreg_key_path(browser: &str, _scope: Scope, host: &str) -> Result<String, InstallError> {
    let cfg = browsers()?.browser(browser)?;
    let root = cfg
        .windows
        .as_ref()
        .and_then(|w| w.registry.as_deref())
        .ok_or_else(|| InstallError::Unsupported {
            browser: browser.to_string(),
            scope: None,
        })?;
    Ok(format!(r"{root}\{host}"))
}
