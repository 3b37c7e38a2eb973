//! Logging setup for the chlens binary
//!
//! Events go to stderr so stdout stays clean for command output. `RUST_LOG`
//! takes precedence over the configured filter.

use chlens_core::LoggingSettings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration resolved from the config file and command line
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl LoggingConfig {
    /// Builds the configuration from file settings and CLI overrides
    pub fn resolve(settings: &LoggingSettings, verbose: bool, force_json: bool) -> Self {
        let default_filter = if verbose {
            "debug".to_string()
        } else {
            settings.filter.clone()
        };
        Self {
            default_filter,
            json: settings.json || force_json,
        }
    }
}

/// Installs the global subscriber
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::debug!(
        filter = %config.default_filter,
        json = config.json,
        "Logging system initialized"
    );
    Ok(())
}
