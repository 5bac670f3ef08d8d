#![cfg(feature = "install")]

mod common;

use comet_share_host::install::paths;
use comet_share_host::{Scope, HOST_NAME};
use serial_test::serial;

#[test]
#[serial]
fn manifest_path_resolves_for_known_browsers_user_scope() {
    let (_sandbox, _env) = common::sandbox_env();

    let browser_keys = [
        "chrome",
        "edge",
        "chromium",
        "brave",
        "vivaldi",
        "firefox",
        "librewolf",
    ];

    for key in browser_keys {
        // Some browsers have no entry for this OS; those are skipped.
        match paths::manifest_path(key, Scope::User, HOST_NAME) {
            Ok(p) => {
                let s = p.to_string_lossy();
                assert!(s.contains(HOST_NAME), "path should include host name: {s}");
                assert!(s.ends_with(".json"), "path should end with .json: {s}");
                assert!(!s.contains('{'), "placeholder left unexpanded: {s}");
            }
            Err(e) => assert!(
                matches!(e, comet_share_host::install::InstallError::Unsupported { .. }),
                "{key}: {e}"
            ),
        }
    }
}

#[test]
#[serial]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn user_scope_lives_under_home() {
    let (sandbox, _env) = common::sandbox_env();
    for key in ["chrome", "firefox"] {
        let p = paths::manifest_path(key, Scope::User, HOST_NAME).unwrap();
        assert!(p.starts_with(&sandbox.home), "{key}: {p:?}");
    }
}
