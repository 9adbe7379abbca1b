//! Tracing subscriber setup for processes embedding the typesystem
//!
//! The libraries only emit `tracing` events; installing a subscriber is left to
//! the binary. `RUST_LOG` takes precedence over the configured level.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::typesystem_config::LoggingConfig;

/// Build the filter: `RUST_LOG` if set, otherwise `config.level`
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level directive: {:?}", config.level)),
    }
}

/// Install a global fmt subscriber (plain or JSON) according to `config`
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
