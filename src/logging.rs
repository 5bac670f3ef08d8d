//! Diagnostic logging.
//!
//! The relay never logs directly: it is handed a [`LogSink`] and reports
//! through it. [`TracingSink`] forwards to `tracing`, whose subscriber is
//! installed once by [`init_file_logging`]. stdout carries protocol frames
//! only, so nothing here ever writes to it.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;

pub const LOG_FILE_NAME: &str = "PerplexityCometShare.log";

/// Somewhere to send one diagnostic line. Implementations must not fail
/// the caller.
pub trait LogSink {
    fn log(&self, level: Level, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}

/// Forwards every line to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!("{message}"),
            Level::WARN => tracing::warn!("{message}"),
            Level::INFO => tracing::info!("{message}"),
            Level::DEBUG => tracing::debug!("{message}"),
            _ => tracing::trace!("{message}"),
        }
    }
}

/// Fixed per-user location of the log file, if the user's home can be found.
pub fn default_log_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|home| home.join("Library/Logs").join(LOG_FILE_NAME))
    }
    #[cfg(windows)]
    {
        std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .map(|dir| dir.join("PerplexityCometShare").join(LOG_FILE_NAME))
    }
    #[cfg(not(any(target_os = "macos", windows)))]
    {
        std::env::var_os("HOME").map(PathBuf::from).map(|home| {
            home.join(".local/state/PerplexityCometShare")
                .join(LOG_FILE_NAME)
        })
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the process-wide subscriber, appending to `path`.
///
/// Falls back to stderr when the file cannot be opened, and returns the
/// open error so the caller can report it through the sink. Installing a
/// second subscriber is silently ignored.
pub fn init_file_logging(path: Option<&Path>) -> Result<(), io::Error> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_target(false);

    let opened = match path {
        Some(path) => open_append(path),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no home directory for the log file",
        )),
    };

    match opened {
        Ok(file) => {
            let _ = builder.with_writer(Mutex::new(file)).try_init();
            Ok(())
        }
        Err(e) => {
            let _ = builder.with_writer(io::stderr).try_init();
            Err(e)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_append_creates_parent_and_appends() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested/dir").join(LOG_FILE_NAME);

        {
            use std::io::Write;
            let mut f = open_append(&path).unwrap();
            writeln!(f, "first").unwrap();
            let mut f = open_append(&path).unwrap();
            writeln!(f, "second").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn sink_by_reference_forwards() {
        let sink = testing::RecordingSink::default();
        let by_ref = &sink;
        by_ref.log(Level::WARN, "careful");
        assert!(sink.contains(Level::WARN, "careful"));
    }
}
