use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize tracing and logging
///
/// This sets up:
/// - Structured JSON logging (production, or `logging.format = "json"`)
/// - Console logging (development)
/// - Environment-based log level filtering, RUST_LOG wins over the config
///
/// Everything is written to stderr so command output on stdout stays clean.
pub fn init_observability(
    service_name: &str,
    service_version: &str,
    logging: &LoggingConfig,
) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let is_production = std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false);

    if is_production || logging.format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()?;
    }

    tracing::debug!(
        service.name = service_name,
        service.version = service_version,
        log.level = %logging.level,
        "Observability initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observability_init_once() {
        let logging = LoggingConfig::default();

        let first = init_observability("test-service", "0.1.0", &logging);
        assert!(first.is_ok(), "Observability init should succeed: {:?}", first.err());

        // A global subscriber can only be installed once per process
        let second = init_observability("test-service", "0.1.0", &logging);
        assert!(second.is_err());
    }
}
