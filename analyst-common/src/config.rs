//! Configuration management for Analyst services.
//!
//! All Analyst services share a unified configuration file at
//! `~/.analyst/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Explicit config file values
//! 2. Environment variables (ANALYST_* prefix)
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `ANALYST_BIND_ADDRESS` → service.host
//! - `ANALYST_VALUATION_PORT` → service.port
//! - `ANALYST_LOG_LEVEL` → observability.log_level
//! - `ANALYST_LOG_FORMAT` → observability.log_format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".analyst"),
        |dirs| dirs.home_dir().join(".analyst"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Service Configuration
// ============================================================================

/// HTTP bind configuration for the valuation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bind address. Default: "127.0.0.1" (local only); set "0.0.0.0" for
    /// remote access.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port number for the service.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

const fn default_port() -> u16 {
    4460
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" or "pretty".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Valuation engine overrides.
///
/// Every field is optional; absent fields fall back to the engine's
/// built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Default cash-flow growth rate for DCF.
    #[serde(default)]
    pub growth_rate: Option<f64>,

    /// Default discount rate for DCF.
    #[serde(default)]
    pub discount_rate: Option<f64>,

    /// Default terminal growth rate for DCF.
    #[serde(default)]
    pub terminal_growth: Option<f64>,

    /// Default projection horizon in years for DCF.
    #[serde(default)]
    pub projection_years: Option<u32>,
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Unified configuration for Analyst services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service bind configuration.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Valuation engine overrides.
    #[serde(default)]
    pub engine: Option<EngineConfig>,
}

impl Config {
    /// Load configuration from the default path, applying environment
    /// variable overrides. A missing config file yields defaults.
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ANALYST_BIND_ADDRESS") {
            self.service.host = host;
        }
        if let Ok(port) = std::env::var("ANALYST_VALUATION_PORT") {
            if let Ok(port) = port.parse() {
                self.service.port = port;
            }
        }
        if let Ok(level) = std::env::var("ANALYST_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Ok(format) = std::env::var("ANALYST_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }
}
