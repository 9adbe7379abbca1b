//! # Dob Typesystem Configuration
//!
//! Centralized configuration loading and logging setup for processes using
//! `dob-types`.
//!
//! ## Features
//!
//! - **Layered loading**: TOML file, environment-specific override file,
//!   `DOB_` environment variables
//! - **Identifier policy**: alias/hash verification for decoded identifiers
//! - **Codec limits**: optional maximum sequence length
//! - **Logging**: `tracing-subscriber` setup with plain or JSON output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dob_config::{init_tracing, TypesystemConfig};
//! use dob_types::ChannelId;
//! use std::path::Path;
//!
//! let config = TypesystemConfig::load(Some(Path::new("config/typesystem.toml")), None)?;
//! init_tracing(&config.logging)?;
//!
//! let policy = config.identifier_policy();
//! let channel: ChannelId = policy.from_raw_and_string(42, "Lobby")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod typesystem_config;

// Re-export commonly used types
pub use logging::{env_filter, init_tracing};
pub use typesystem_config::{
    load_config, IdentifierConfig, LimitsConfig, LoggingConfig, TypesystemConfig,
};
