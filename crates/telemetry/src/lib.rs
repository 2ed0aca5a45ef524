//! Logging and tracing bootstrap.

use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Calling this twice is an error
/// because only one global subscriber can be installed per process.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
    }

    tracing::info!(
        target: "shelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))?;
    Ok(filter)
}
