//! The JSON shapes exchanged with the extension.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status attached to a URL that reached the host.
pub const STATUS_RECEIVED: &str = "received";
/// Error text for a message that carries no URL.
pub const NO_URL_PROVIDED: &str = "No URL provided";

/// A decoded message payload.
///
/// Variants are tried in declaration order, so an object carrying both
/// `url` and a string `status` is a [`Message::Status`]. The `url` key
/// counts whatever its JSON value is. Keys a variant does not name are
/// kept in `extra` and written back out unchanged. Any other JSON object
/// is kept as [`Message::Unrecognized`]; a payload that is not an object
/// does not decode at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Status {
        url: Value,
        status: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Url {
        url: Value,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Error {
        error: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Unrecognized(Map<String, Value>),
}

impl Message {
    pub fn url(url: impl Into<String>) -> Self {
        Message::Url {
            url: Value::String(url.into()),
            extra: Map::new(),
        }
    }

    pub fn received(url: impl Into<Value>) -> Self {
        Message::Status {
            url: url.into(),
            status: STATUS_RECEIVED.to_string(),
            extra: Map::new(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Message::Error {
            error: error.into(),
            extra: Map::new(),
        }
    }

    /// The `url` value carried by this message, if the key is present.
    pub fn shared_url(&self) -> Option<&Value> {
        match self {
            Message::Status { url, .. } | Message::Url { url, .. } => Some(url),
            Message::Error { .. } | Message::Unrecognized(_) => None,
        }
    }

    /// The reply the relay sends for this inbound message: the `url` value
    /// echoed as-is with a status, or an error when there is no `url` key.
    pub fn reply(&self) -> Message {
        match self.shared_url() {
            Some(url) => Message::received(url.clone()),
            None => Message::error(NO_URL_PROVIDED),
        }
    }
}
