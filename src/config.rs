//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any command
//! runs. A `.env` file in the working directory is honoured (loaded by
//! `dotenvy` in `main.rs`).
//!
//! ```bash
//! export STORE_PATH="$HOME/.local/share/shortener.json"
//! export BASE_URL="https://sho.rt"
//! export DEFAULT_VALIDITY_MINUTES=60
//! ```
//!
//! ## Variables
//!
//! - `STORE_PATH` - JSON file backing the store (default: `shortener-data.json`)
//! - `BASE_URL` - Prefix for printed short URLs (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_VALIDITY_MINUTES` - Validity when none is given (default: 30, 1-10080)
//! - `SHORTCODE_LENGTH` - Length of generated codes (default: 6, 4-20)
//! - `MAX_GENERATION_ATTEMPTS` - Random probes before fallback (default: 100)
//! - `RECHECK_FALLBACK_SHORTCODE` - Re-check fallback codes for collisions (default: false)
//! - `LOG_CAPACITY` - Retained activity log entries (default: 1000)
//! - `MAX_BATCH_SIZE` - URLs accepted per `shorten` call (default: 5, max: 100)

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::application::services::link_service::{
    DEFAULT_BASE_URL, DEFAULT_MAX_BATCH_SIZE, DEFAULT_VALIDITY_MINUTES,
};
use crate::application::services::shortcode_allocator::DEFAULT_MAX_ATTEMPTS;
use crate::infrastructure::persistence::kv_log_repository::DEFAULT_LOG_CAPACITY;
use crate::utils::code_generator::DEFAULT_CODE_LENGTH;

pub const DEFAULT_STORE_PATH: &str = "shortener-data.json";

/// Upper bound for validity periods: seven days.
pub const MAX_VALIDITY_MINUTES: u32 = 10_080;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: u32,
    pub shortcode_length: usize,
    pub max_generation_attempts: usize,
    /// When true, the time-derived fallback code is checked against stored
    /// records once and a collision is reported instead of overwriting.
    pub recheck_fallback_shortcode: bool,
    pub log_capacity: usize,
    pub max_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            shortcode_length: DEFAULT_CODE_LENGTH,
            max_generation_attempts: DEFAULT_MAX_ATTEMPTS,
            recheck_fallback_shortcode: false,
            log_capacity: DEFAULT_LOG_CAPACITY,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults; ranges are
    /// checked by [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let store_path = env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);
        let base_url = env::var("BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let recheck_fallback_shortcode = env::var("RECHECK_FALLBACK_SHORTCODE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.recheck_fallback_shortcode);

        Ok(Self {
            store_path,
            base_url,
            log_level,
            log_format,
            default_validity_minutes: parse_or(
                "DEFAULT_VALIDITY_MINUTES",
                defaults.default_validity_minutes,
            ),
            shortcode_length: parse_or("SHORTCODE_LENGTH", defaults.shortcode_length),
            max_generation_attempts: parse_or(
                "MAX_GENERATION_ATTEMPTS",
                defaults.max_generation_attempts,
            ),
            recheck_fallback_shortcode,
            log_capacity: parse_or("LOG_CAPACITY", defaults.log_capacity),
            max_batch_size: parse_or("MAX_BATCH_SIZE", defaults.max_batch_size),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `base_url` is not an absolute http(s) URL
    /// - any numeric setting is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.store_path.as_os_str().is_empty() {
            anyhow::bail!("STORE_PATH must not be empty");
        }

        if !(1..=MAX_VALIDITY_MINUTES).contains(&self.default_validity_minutes) {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be between 1 and {}, got {}",
                MAX_VALIDITY_MINUTES,
                self.default_validity_minutes
            );
        }

        if !(4..=20).contains(&self.shortcode_length) {
            anyhow::bail!(
                "SHORTCODE_LENGTH must be between 4 and 20, got {}",
                self.shortcode_length
            );
        }

        if self.max_generation_attempts == 0 {
            anyhow::bail!("MAX_GENERATION_ATTEMPTS must be at least 1");
        }

        if self.log_capacity == 0 {
            anyhow::bail!("LOG_CAPACITY must be at least 1");
        }

        if self.max_batch_size == 0 || self.max_batch_size > 100 {
            anyhow::bail!(
                "MAX_BATCH_SIZE must be between 1 and 100, got {}",
                self.max_batch_size
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Store path: {}", self.store_path.display());
        tracing::debug!("  Base URL: {}", self.base_url);
        tracing::debug!("  Log level: {}", self.log_level);
        tracing::debug!("  Log format: {}", self.log_format);
        tracing::debug!("  Default validity: {} minutes", self.default_validity_minutes);
        tracing::debug!(
            "  Shortcodes: length {}, {} attempts, fallback recheck {}",
            self.shortcode_length,
            self.max_generation_attempts,
            if self.recheck_fallback_shortcode { "on" } else { "off" }
        );
        tracing::debug!("  Log capacity: {}", self.log_capacity);
        tracing::debug!("  Max batch size: {}", self.max_batch_size);
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
