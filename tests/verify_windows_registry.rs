#![cfg(all(windows, feature = "windows-registry"))]

mod common;

use comet_share_host::install::paths;
use comet_share_host::{install, remove, verify_installed, Scope};
use serial_test::serial;

use std::path::PathBuf;

fn exe_path() -> PathBuf {
    PathBuf::from(r"C:\Windows\System32\cmd.exe")
}

#[test]
#[serial]
fn verify_is_registry_aware_on_windows() {
    let (_sandbox, _env) = common::sandbox_env();

    let host = "com.example.winregverify";
    let browsers: &[&str] = &["chrome", "firefox", "edge"];

    install(
        host,
        "test host",
        &exe_path(),
        &["chrome-extension://test/".to_string()],
        &["test@example.org".to_string()],
        browsers,
        Scope::User,
    )
    .unwrap();

    assert!(verify_installed(host, Some(browsers), Scope::User).unwrap());

    // The registry pointer must resolve to the manifest that was written.
    let key_path = paths::winreg_key_path("chrome", Scope::User, host).unwrap();
    let p = comet_share_host::install::winreg::read_manifest_path_from_reg(Scope::User, &key_path)
        .unwrap()
        .expect("registry key should exist");
    assert_eq!(p, paths::manifest_path("chrome", Scope::User, host).unwrap());
    assert!(p.exists(), "registry should point to existing manifest: {p:?}");

    remove(host, browsers, Scope::User).unwrap();
    assert!(!verify_installed(host, Some(browsers), Scope::User).unwrap());
}
