//! Shared configuration and logging setup for oasdecl
//!
//! This crate contains functionality used by both the `oasdecl` binary and
//! the CLI integration tests.

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{CONFIG_FILENAME, Config, ConfigError};
pub use logging::{LOG_ENV_VAR, init_tracing};
