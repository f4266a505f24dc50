//! Performance instrumentation for latency profiling.
//!
//! Enable with `--features instrumentation`. The search, move generation and
//! evaluation entry points are annotated with `#[instrument]`; this module
//! installs a subscriber that reports each span's busy and idle time when it
//! closes.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Respects the RUST_LOG environment variable. When it is unset, every span
/// is reported.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .compact()
        .try_init();

    if let Err(err) = result {
        eprintln!("Failed to set tracing subscriber: {}", err);
    }
}
