//! `comet-share-host`: relays a shared URL to the browser extension over native messaging.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use comet_share_host::logging::{self, LogSink, TracingSink};
use comet_share_host::{Mode, Relay};

/// Relay a shared URL to the Comet Share browser extension.
#[derive(Parser, Debug)]
#[command(name = "comet-share-host", version, about)]
struct Cli {
    /// URL to forward as a single frame. Without it, frames are relayed
    /// from stdin until it closes.
    #[arg(allow_hyphen_values = true)]
    url: Option<String>,

    /// Extra arguments some browsers append when launching a host.
    #[arg(hide = true, allow_hyphen_values = true, trailing_var_arg = true, num_args = 0..)]
    _rest: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let sink = TracingSink;
    let log_path = logging::default_log_path();
    if let Err(e) = logging::init_file_logging(log_path.as_deref()) {
        sink.log(Level::WARN, &format!("log file unavailable, using stderr: {e}"));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut relay = Relay::new(stdin.lock(), stdout.lock(), sink);

    // The host reads results from frames only; the exit status is always 0.
    let _ = relay.run(Mode::from_arg(cli.url));
    ExitCode::SUCCESS
}
