//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    feed = %config.feed.url,
    primary = %config.session.primary_symbol,
    secondary = %config.session.secondary_symbol,
    debounce_ms = config.session.debounce_ms,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
///
/// # Errors
/// Returns error if the TOML is malformed or fails validation.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - A usable http(s) feed URL
/// - Positive timeouts and delays
/// - Distinct, non-empty default symbols
fn validate_config(config: &AppConfig) -> Result<()> {
  // Feed validation
  anyhow::ensure!(
    !config.feed.url.is_empty(),
    "Feed URL must not be empty"
  );
  anyhow::ensure!(
    config.feed.url.starts_with("http://") || config.feed.url.starts_with("https://"),
    "Feed URL must use http or https, got {}",
    config.feed.url
  );
  anyhow::ensure!(
    config.feed.timeout_ms > 0,
    "Feed timeout_ms must be positive"
  );

  // Session validation
  anyhow::ensure!(
    !config.session.primary_symbol.trim().is_empty(),
    "Session primary_symbol must not be empty"
  );
  anyhow::ensure!(
    !config.session.secondary_symbol.trim().is_empty(),
    "Session secondary_symbol must not be empty"
  );
  anyhow::ensure!(
    config.session.primary_symbol != config.session.secondary_symbol,
    "Session primary and secondary symbols must differ, both are {}",
    config.session.primary_symbol
  );
  anyhow::ensure!(
    config.session.debounce_ms > 0,
    "Session debounce_ms must be positive"
  );

  Ok(())
}
