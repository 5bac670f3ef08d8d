//! The read-dispatch-respond loop.
//!
//! The mode is picked once at startup:
//!
//! - [`Mode::Argument`]: a URL came on the command line. One `{"url": ...}`
//!   frame is written and the relay stops without reading input.
//! - [`Mode::Loop`]: frames are read one at a time and each gets exactly
//!   one reply, until the input closes or a frame fails to decode.
//!
//! Every frame either side of the relay goes through [`crate::host`], so
//! the peer never sees a partial or unframed write.

use std::io::{Read, Write};

use tracing::Level;

use crate::host::{self, FrameError, MAX_FROM_BROWSER};
use crate::logging::LogSink;
use crate::message::Message;

/// How the relay was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Argument(String),
    Loop,
}

impl Mode {
    pub fn from_arg(url: Option<String>) -> Self {
        match url {
            Some(url) => Mode::Argument(url),
            None => Mode::Loop,
        }
    }
}

/// Why the relay stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The argument URL was written.
    Forwarded,
    /// Input closed between frames.
    EndOfStream,
    /// A frame could not be read or decoded; an error frame was sent.
    DecodeFailed,
    /// A reply could not be encoded; an error frame was sent in its place.
    EncodeFailed,
}

/// The relay could not write to its output stream.
#[derive(Debug, thiserror::Error)]
#[error("failed to write frame: {0}")]
pub struct RelayError(#[source] pub FrameError);

/// What the loop does after one read.
enum Step {
    Continue,
    Stop(Termination),
}

/// A relay between one input stream and one output stream.
pub struct Relay<R, W, L> {
    reader: R,
    writer: W,
    sink: L,
    max_incoming: usize,
}

impl<R: Read, W: Write, L: LogSink> Relay<R, W, L> {
    pub fn new(reader: R, writer: W, sink: L) -> Self {
        Self {
            reader,
            writer,
            sink,
            max_incoming: MAX_FROM_BROWSER,
        }
    }

    /// Cap on incoming payloads. Never raised above [`MAX_FROM_BROWSER`].
    pub fn with_max_incoming(mut self, max: usize) -> Self {
        self.max_incoming = max;
        self
    }

    /// Run to completion in `mode`.
    pub fn run(&mut self, mode: Mode) -> Result<Termination, RelayError> {
        self.sink.log(Level::INFO, "Native host started");
        let outcome = match mode {
            Mode::Argument(url) => self.forward(url),
            Mode::Loop => self.serve(),
        };
        match &outcome {
            Ok(termination) => self
                .sink
                .log(Level::INFO, &format!("Native host stopped ({termination:?})")),
            Err(e) => self.sink.log(Level::ERROR, &format!("Error: {e}")),
        }
        outcome
    }

    fn forward(&mut self, url: String) -> Result<Termination, RelayError> {
        self.sink.log(Level::INFO, &format!("URL from argv: {url}"));
        match self.reply(&Message::url(url))? {
            Step::Continue => Ok(Termination::Forwarded),
            Step::Stop(termination) => Ok(termination),
        }
    }

    fn serve(&mut self) -> Result<Termination, RelayError> {
        loop {
            if let Step::Stop(termination) = self.step()? {
                return Ok(termination);
            }
        }
    }

    fn step(&mut self) -> Result<Step, RelayError> {
        match host::read_message::<_, Message>(&mut self.reader, self.max_incoming) {
            Ok(None) => Ok(Step::Stop(Termination::EndOfStream)),
            Ok(Some(msg)) => {
                self.sink.log(Level::INFO, &format!("Received: {msg:?}"));
                let reply = msg.reply();
                if let Message::Error { error, .. } = &reply {
                    self.sink.log(Level::WARN, error);
                }
                self.reply(&reply)
            }
            Err(e) => {
                self.sink.log(Level::ERROR, &format!("Error: {e}"));
                self.send(&Message::error(e.to_string()))?;
                Ok(Step::Stop(Termination::DecodeFailed))
            }
        }
    }

    /// Write `msg`. If it cannot be encoded nothing has reached the stream
    /// yet, so the encoding error is sent in its place and the relay stops.
    fn reply(&mut self, msg: &Message) -> Result<Step, RelayError> {
        match host::write_message(&mut self.writer, msg) {
            Ok(()) => Ok(Step::Continue),
            Err(FrameError::Io(e)) => Err(RelayError(FrameError::Io(e))),
            Err(e) => {
                self.sink.log(Level::ERROR, &format!("Error: {e}"));
                self.send(&Message::error(e.to_string()))?;
                Ok(Step::Stop(Termination::EncodeFailed))
            }
        }
    }

    fn send(&mut self, msg: &Message) -> Result<(), RelayError> {
        host::write_message(&mut self.writer, msg).map_err(RelayError)
    }

    /// Give back the streams.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
