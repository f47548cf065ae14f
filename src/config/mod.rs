//! Configuration Module - TOML-based Quote Engine Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Feed endpoint, default token pair and timing parameters are
//! externalized here - nothing is hardcoded in the usecases layer.

pub mod loader;

use serde::Deserialize;

/// Top-level configuration.
///
/// Loaded from `config.toml` at startup. Every section has defaults,
/// so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Application identity and logging.
  #[serde(default)]
  pub app: AppSection,
  /// Price feed endpoint.
  #[serde(default)]
  pub feed: FeedConfig,
  /// Quote session behaviour.
  #[serde(default)]
  pub session: SessionConfig,
  /// Simulated settlement.
  #[serde(default)]
  pub settlement: SettlementConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable name, used in the startup log line.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Price feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
  /// Price list URL (JSON array of `{currency, price, date}`).
  #[serde(default = "default_feed_url")]
  pub url: String,
  /// Request timeout in milliseconds.
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
}

/// Quote session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
  /// Preferred default source token.
  #[serde(default = "default_primary_symbol")]
  pub primary_symbol: String,
  /// Preferred default target token.
  #[serde(default = "default_secondary_symbol")]
  pub secondary_symbol: String,
  /// Input inactivity required before the amount is committed (ms).
  #[serde(default = "default_debounce_ms")]
  pub debounce_ms: u64,
}

/// Simulated settlement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
  /// Artificial settlement latency (ms).
  #[serde(default = "default_latency_ms")]
  pub latency_ms: u64,
}

impl Default for AppSection {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
    }
  }
}

impl Default for FeedConfig {
  fn default() -> Self {
    Self {
      url: default_feed_url(),
      timeout_ms: default_timeout_ms(),
    }
  }
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      primary_symbol: default_primary_symbol(),
      secondary_symbol: default_secondary_symbol(),
      debounce_ms: default_debounce_ms(),
    }
  }
}

impl Default for SettlementConfig {
  fn default() -> Self {
    Self {
      latency_ms: default_latency_ms(),
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "swap-quote".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_feed_url() -> String {
  "https://interview.switcheo.com/prices.json".to_string()
}

fn default_timeout_ms() -> u64 {
  10_000
}

fn default_primary_symbol() -> String {
  "ETH".to_string()
}

fn default_secondary_symbol() -> String {
  "USDC".to_string()
}

fn default_debounce_ms() -> u64 {
  300
}

fn default_latency_ms() -> u64 {
  1_500
}
