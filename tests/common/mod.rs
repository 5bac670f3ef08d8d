#![allow(dead_code)]

use std::{collections::HashMap, env, path::PathBuf};
use tempfile::TempDir;

/// Env guard that restores previous env vars on drop.
pub struct EnvGuard {
    old: HashMap<String, Option<String>>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, String)]) -> Self {
        let mut old = HashMap::new();
        for (k, v) in vars {
            old.insert((*k).to_string(), env::var(k).ok());
            env::set_var(k, v);
        }
        Self { old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, prev) in self.old.drain() {
            match prev {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
    }
}

/// Sandbox directories standing in for the user's profile locations.
pub struct Sandbox {
    pub root: TempDir,
    pub home: PathBuf,
    pub appdata: PathBuf,
    pub localappdata: PathBuf,
    pub programdata: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().expect("tempdir");
        let home = root.path().join("home");
        let appdata = root.path().join("appdata_roaming");
        let localappdata = root.path().join("appdata_local");
        let programdata = root.path().join("programdata");
        for dir in [&home, &appdata, &localappdata, &programdata] {
            std::fs::create_dir_all(dir).unwrap();
        }
        Self {
            root,
            home,
            appdata,
            localappdata,
            programdata,
        }
    }

    pub fn vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("HOME", self.home.to_string_lossy().to_string()),
            ("APPDATA", self.appdata.to_string_lossy().to_string()),
            ("LOCALAPPDATA", self.localappdata.to_string_lossy().to_string()),
            ("PROGRAMDATA", self.programdata.to_string_lossy().to_string()),
        ]
    }
}

/// Create a sandbox and point the profile env vars at it, so manifest
/// installs and log files never touch the real profile.
pub fn sandbox_env() -> (Sandbox, EnvGuard) {
    let sandbox = Sandbox::new();
    let guard = EnvGuard::set(&sandbox.vars());
    (sandbox, guard)
}

/// Build one frame by hand: native-endian length + raw body.
pub fn raw_frame(body: &[u8]) -> Vec<u8> {
    let mut frame = (body.len() as u32).to_ne_bytes().to_vec();
    frame.extend_from_slice(body);
    frame
}

/// Split a byte stream into JSON payloads, checking every prefix.
pub fn split_frames(mut bytes: &[u8]) -> Vec<serde_json::Value> {
    let mut out = Vec::new();
    while !bytes.is_empty() {
        assert!(bytes.len() >= 4, "dangling prefix bytes: {bytes:?}");
        let len = u32::from_ne_bytes(bytes[0..4].try_into().unwrap()) as usize;
        assert!(bytes.len() >= 4 + len, "frame body shorter than its prefix");
        out.push(serde_json::from_slice(&bytes[4..4 + len]).expect("frame body is JSON"));
        bytes = &bytes[4 + len..];
    }
    out
}
