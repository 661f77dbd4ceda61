//! Configuration loading and validation.

#[expect(clippy::module_inception, reason = "Matches the on-disk layout of the config module")]
mod config;

pub use config::{Config, DEFAULT_CONFIG_TOML, NUM_BANDS};
