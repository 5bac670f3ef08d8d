//! # comet_share_host
//!
//! The native messaging host behind the Perplexity Comet Share extension.
//!
//! An OS share action hands a URL to this process; the process hands it to
//! the browser extension over the **native messaging** channel. It is a
//! relay and nothing more:
//!
//! - `comet-share-host <url>` writes one `{"url": "<url>"}` frame to stdout
//!   and exits.
//! - `comet-share-host` (no arguments) reads frames from stdin and answers
//!   each one on stdout until stdin closes.
//!
//! ---
//!
//! ## Wire protocol
//!
//! 1. A **4-byte length prefix** (`u32`) in **native endianness**.
//! 2. **That many bytes** of UTF-8 JSON.
//!
//! The browser enforces a 1 MiB limit on host → browser messages
//! ([`host::MAX_TO_BROWSER`]); this crate rejects browser → host messages
//! over 64 MiB ([`host::MAX_FROM_BROWSER`]).
//!
//! ### Replies in loop mode
//!
//! | inbound                     | reply                                        | loop      |
//! |-----------------------------|----------------------------------------------|-----------|
//! | any object with a `url` key | `{"url": <same value>, "status": "received"}` | continues |
//! | object without `url`        | `{"error": "No URL provided"}`               | continues |
//! | truncated / invalid frame   | `{"error": "<description>"}`                 | stops     |
//! | reply over 1 MiB            | `{"error": "<description>"}`                 | stops     |
//! | stdin closed between frames | nothing                                      | stops     |
//!
//! The process exits with status 0 in every case.
//!
//! ---
//!
//! ## Framing without stdio
//!
//! ```rust
//! use comet_share_host::host::{encode_message, read_message, MAX_FROM_BROWSER};
//! use comet_share_host::Message;
//! use std::io::Cursor;
//!
//! let frame = encode_message(&Message::url("https://example.com")).unwrap();
//!
//! let mut cur = Cursor::new(frame);
//! let back: Message = read_message(&mut cur, MAX_FROM_BROWSER).unwrap().unwrap();
//! assert_eq!(back.shared_url().and_then(|u| u.as_str()), Some("https://example.com"));
//!
//! // Nothing left: a clean end of stream.
//! assert!(read_message::<_, Message>(&mut cur, MAX_FROM_BROWSER).unwrap().is_none());
//! ```
//!
//! ## Driving the relay over in-memory streams
//!
//! ```rust
//! use comet_share_host::{Mode, Relay, Termination, TracingSink};
//! use comet_share_host::host::encode_message;
//! use serde_json::json;
//! use std::io::Cursor;
//!
//! let input = encode_message(&json!({"url": "https://a.b"})).unwrap();
//! let mut relay = Relay::new(Cursor::new(input), Vec::new(), TracingSink);
//! assert_eq!(relay.run(Mode::Loop).unwrap(), Termination::EndOfStream);
//! ```
//!
//! ---
//!
//! ## Logging
//!
//! stdout belongs to the protocol. Diagnostics go through a [`LogSink`];
//! the binary installs a `tracing` subscriber that appends to a per-user
//! log file (see [`logging::default_log_path`]) and falls back to stderr.
//!
//! ## Registering the host
//!
//! With the `install` feature (on by default) the crate can write, verify
//! and remove the native messaging manifest that lets the extension call
//! `chrome.runtime.connectNative("com.perplexity.comet.share")`.
//!
//! ```no_run
//! use std::path::Path;
//! use comet_share_host::{install, HOST_DESCRIPTION, HOST_NAME, Scope};
//!
//! install(
//!     HOST_NAME,
//!     HOST_DESCRIPTION,
//!     Path::new("/usr/local/bin/comet-share-host"),
//!     &["chrome-extension://your_extension_id/".to_string()],
//!     &[],
//!     &["chrome"],
//!     Scope::User,
//! )
//! .unwrap();
//! ```

pub mod host;
pub mod logging;
pub mod message;
pub mod relay;

#[cfg(feature = "install")]
pub mod install;

// -------- Relay re-exports --------

#[doc(inline)]
pub use host::{encode_message, read_message, write_message, FrameError};
#[doc(inline)]
pub use logging::{LogSink, TracingSink};
#[doc(inline)]
pub use message::Message;
#[doc(inline)]
pub use relay::{Mode, Relay, RelayError, Termination};

// -------- Install re-exports --------

#[cfg(feature = "install")]
#[doc(inline)]
pub use install::manifest::{install, remove, verify_installed, HOST_DESCRIPTION, HOST_NAME};
#[cfg(feature = "install")]
#[doc(inline)]
pub use install::paths::Scope;
