use crate::config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the tracing subscriber with an env-driven filter.
///
/// Defaults to `info` with the noisier infrastructure crates capped at `warn`;
/// `RUST_LOG` overrides everything.
pub fn init_telemetry(config: &TelemetryConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("sqlx=warn".parse().expect("static directive"))
            .add_directive("hyper=warn".parse().expect("static directive"))
            .add_directive("tower=warn".parse().expect("static directive"))
    });

    let registry = Registry::default().with(filter);

    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}
