//! Diagnostic logging setup for the command-line front end.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary.

use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

/// Map a `-v` count to a maximum log level. No flag means warnings only.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a compact stderr subscriber.
///
/// Does nothing if a global subscriber is already set.
pub fn setup_logging(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for_verbosity(verbose))
        .with_writer(std::io::stderr)
        .compact()
        .finish()
        .try_init();
}
