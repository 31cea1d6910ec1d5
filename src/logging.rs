use std::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_LOG_LEVEL: &str = "info";

struct UtcTime;

impl FormatTime for UtcTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

/// Installs the global subscriber. The filter is read from `RUST_LOG` and defaults to `info`.
/// Logs go to stderr so that command output on stdout stays clean.
pub fn init() -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_timer(UtcTime)
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| e.to_string())
}
