//! Stderr logging for the `control` binary.
//!
//! Two channels leave a decision, and they never share a writer:
//!
//! - `tracing` events from `io::diagnostics::TracingObserver` go to stderr
//!   through the subscriber set up here. `RUST_LOG` picks the level. Without
//!   it only warnings and errors show, so an emergency override or a sensor
//!   fault is visible while `decision started`/`decision finished` are not.
//! - The debug block from `io::diagnostics::DebugTranscript` is written by
//!   `main` to stdout, and only for `--debug` or `output.debug = true`.
//!   `RUST_LOG` has no effect on it. It is refused together with JSON output
//!   so stdout stays a single JSON document.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber: `RUST_LOG` filter (default `warn`), compact
/// lines on stderr.
///
/// ```bash
/// RUST_LOG=control=debug control eval 2 0 7 0
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
