//! Logging setup for fncall
//!
//! Installs a `tracing-subscriber` registry whose output format follows the
//! configuration's `prod_mode` flag

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for development
    Pretty,
    /// One JSON object per line for log collectors
    Json,
}

impl LogFormat {
    /// Production deployments log JSON, development logs plain text
    #[must_use]
    pub const fn for_prod_mode(prod_mode: bool) -> Self {
        if prod_mode { Self::Json } else { Self::Pretty }
    }
}

/// Initialize the global subscriber
///
/// An unparsable `log_filter` falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(format: LogFormat, log_filter: &str) -> anyhow::Result<()> {
    let filter = build_filter(log_filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
        LogFormat::Pretty => registry.with(fmt_layer).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::debug!(?format, filter = log_filter, "logging initialized");

    Ok(())
}

fn build_filter(log_filter: &str) -> EnvFilter {
    EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
}
