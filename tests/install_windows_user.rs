#![cfg(all(windows, feature = "install"))]

mod common;

use comet_share_host::install::paths::manifest_path;
use comet_share_host::install::{install, remove, verify_installed, Scope};
use serial_test::serial;
use std::{fs, path::Path};

#[test]
#[serial]
fn install_succeeds_and_writes_chrome_manifest_windows() {
    let (sandbox, _env) = common::sandbox_env();
    let host_exe = sandbox.root.path().join("host.exe");
    fs::write(&host_exe, b"not really an exe").unwrap();

    let name = "com.example.win_host";
    let chrome_origin = "chrome-extension://aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa/".to_string();

    install(
        name,
        "Example host",
        Path::new(&host_exe),
        &[chrome_origin],
        &["native-test@example.com".to_string()],
        &["chrome"],
        Scope::User,
    )
    .expect("install");

    assert!(verify_installed(name, Some(&["chrome"][..]), Scope::User).expect("verify"));

    let chrome_path = manifest_path("chrome", Scope::User, name).unwrap();
    assert!(chrome_path.starts_with(&sandbox.localappdata));
    assert!(chrome_path.exists());

    remove(name, &["chrome"], Scope::User).expect("remove");
    assert!(!chrome_path.exists());
}
