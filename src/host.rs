//! Native messaging framing over any `Read`/`Write` pair.
//!
//! A frame is a 4-byte length prefix (`u32`, native endianness) followed by
//! exactly that many bytes of UTF-8 JSON.

use serde::{de::DeserializeOwned, Serialize};
use std::io::{self, Read, Write};
use std::string::FromUtf8Error;

/// Largest payload the host may send to the browser (1 MiB).
pub const MAX_TO_BROWSER: usize = 1_048_576;
/// Largest payload the browser may send to the host (64 MiB).
pub const MAX_FROM_BROWSER: usize = 64 * 1_048_576;

const PREFIX_LEN: usize = 4;

/// Errors raised while reading or writing a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream closed part way through the length prefix.
    #[error("truncated length prefix: got {0} of 4 bytes")]
    TruncatedPrefix(usize),

    /// The stream closed before the declared payload was read.
    #[error("truncated frame: expected {expected} bytes, got {received}")]
    Truncated { expected: usize, received: usize },

    /// The payload exceeds the limit for its direction.
    #[error("message too large ({size} bytes, max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("frame I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Read the length prefix.
///
/// `Ok(None)` means the stream was already closed: no prefix byte arrived.
fn read_len_prefix<R: Read>(r: &mut R) -> Result<Option<u32>, FrameError> {
    let mut len_buf = [0u8; PREFIX_LEN];
    let mut filled = 0;
    while filled < PREFIX_LEN {
        match r.read(&mut len_buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FrameError::Io(e)),
        }
    }
    match filled {
        0 => Ok(None),
        PREFIX_LEN => Ok(Some(u32::from_ne_bytes(len_buf))),
        partial => Err(FrameError::TruncatedPrefix(partial)),
    }
}

/// Read one raw frame payload.
///
/// Returns `Ok(None)` on a clean end of stream. A declared length above
/// `max_size` (capped at [`MAX_FROM_BROWSER`]) is rejected before any of
/// the body is read.
pub fn read_frame<R: Read>(reader: &mut R, max_size: usize) -> Result<Option<Vec<u8>>, FrameError> {
    let len = match read_len_prefix(&mut *reader)? {
        Some(len) => len as usize,
        None => return Ok(None),
    };
    let cap = max_size.min(MAX_FROM_BROWSER);
    if len > cap {
        return Err(FrameError::TooLarge { size: len, max: cap });
    }

    // `take` keeps a lying prefix from forcing a large up-front allocation.
    let mut buf = Vec::with_capacity(len.min(64 * 1024));
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(FrameError::Truncated {
            expected: len,
            received: buf.len(),
        });
    }
    Ok(Some(buf))
}

/// Decode a single framed message into its JSON text.
pub fn decode_message<R: Read>(reader: &mut R, max_size: usize) -> Result<Option<String>, FrameError> {
    match read_frame(reader, max_size)? {
        Some(bytes) => Ok(Some(String::from_utf8(bytes)?)),
        None => Ok(None),
    }
}

/// Decode a single framed message straight into `T`.
pub fn read_message<R, T>(reader: &mut R, max_size: usize) -> Result<Option<T>, FrameError>
where
    R: Read,
    T: DeserializeOwned,
{
    match decode_message(reader, max_size)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Encode any serde-serializable value into the native-messaging frame:
/// 4-byte native-endian length + JSON bytes.
pub fn encode_message<T: Serialize>(msg: &T) -> Result<Vec<u8>, FrameError> {
    let json = serde_json::to_vec(msg)?;
    if json.len() > MAX_TO_BROWSER {
        return Err(FrameError::TooLarge {
            size: json.len(),
            max: MAX_TO_BROWSER,
        });
    }
    let mut out = Vec::with_capacity(PREFIX_LEN + json.len());
    out.extend_from_slice(&(json.len() as u32).to_ne_bytes());
    out.extend_from_slice(&json);
    Ok(out)
}

/// Encode `msg`, write the whole frame and flush.
///
/// The frame is built in memory first so a serialization failure never
/// leaves a partial frame on the stream.
pub fn write_message<W: Write, T: Serialize>(writer: &mut W, msg: &T) -> Result<(), FrameError> {
    let frame = encode_message(msg)?;
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}
