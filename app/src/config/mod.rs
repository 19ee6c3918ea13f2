//! Configuration management for the calculator form
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: BMC__)

use anyhow::Result;
use body_metrics_shared::{ActivityLevel, BiologicalSex, UnitSystem};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub form: FormDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Selections a fresh form starts with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormDefaults {
    pub unit_system: UnitSystem,
    pub biological_sex: BiologicalSex,
    pub activity_level: ActivityLevel,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
    /// Emit JSON lines instead of pretty output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        if AppConfig::is_production() {
            Self {
                filter: "body_metrics_app=info".to_string(),
                json: true,
            }
        } else {
            Self {
                filter: "body_metrics_app=debug".to_string(),
                json: false,
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with BMC__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);
        Self::load_from(&config_file)
    }

    /// Load configuration using an explicit config file path
    pub fn load_from(config_file: &str) -> Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(
                config::File::with_name(config_file)
                    .required(false)
            )
            // e.g., BMC__FORM__UNIT_SYSTEM=imperial sets form.unit_system
            .add_source(
                config::Environment::with_prefix("BMC")
                    .prefix_separator("__")
                    .separator("__")
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
