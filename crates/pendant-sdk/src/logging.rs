//! Logging initialization for host applications, grounded on `piper-sdk`'s
//! `tracing-subscriber`/`tracing-log` pairing: a `tracing` subscriber reads
//! `RUST_LOG`-style filters, and `tracing-log` bridges any `log` crate
//! output from a dependency into the same subscriber.

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber reading `RUST_LOG` (defaulting to
/// `info`), and bridge the `log` facade into it. Safe to call once per
/// process; a second call is a no-op logged at `debug`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    if tracing_log::LogTracer::init().is_err() {
        tracing::debug!("log bridge already installed");
    }
}
