//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! table-league service, including environment variable loading, TOML file
//! loading, and validation.

use crate::config::rating::RatingSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Path of the league state file used by the CLI
    pub state_path: PathBuf,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "table-league".to_string(),
            log_level: "info".to_string(),
            state_path: PathBuf::from("league.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(path) = env::var("LEAGUE_STATE_PATH") {
            config.service.state_path = PathBuf::from(path);
        }

        // Rating settings
        if let Ok(mu) = env::var("RATING_DEFAULT_MU") {
            config.rating.default_mu = mu
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_DEFAULT_MU value: {}", mu))?;
        }
        if let Ok(sigma) = env::var("RATING_DEFAULT_SIGMA") {
            config.rating.default_sigma = sigma
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_DEFAULT_SIGMA value: {}", sigma))?;
        }
        if let Ok(sigma) = env::var("RATING_REGISTRATION_SIGMA") {
            config.rating.registration_sigma = sigma
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_REGISTRATION_SIGMA value: {}", sigma))?;
        }
        if let Ok(beta) = env::var("RATING_BETA") {
            config.rating.beta = beta
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_BETA value: {}", beta))?;
        }
        if let Ok(floor) = env::var("RATING_SIGMA_FLOOR") {
            config.rating.sigma_floor = floor
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_SIGMA_FLOOR value: {}", floor))?;
        }
        if let Ok(weight) = env::var("RATING_WENT_UNDER_WEIGHT") {
            config.rating.went_under_weight = weight
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_WENT_UNDER_WEIGHT value: {}", weight))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate rating settings
    if config.rating.default_sigma <= 0.0 {
        return Err(anyhow!("Default sigma must be positive"));
    }
    if config.rating.registration_sigma <= 0.0 {
        return Err(anyhow!("Registration sigma must be positive"));
    }
    if config.rating.beta <= 0.0 {
        return Err(anyhow!("Beta must be positive"));
    }
    if config.rating.sigma_floor <= 0.0 {
        return Err(anyhow!("Sigma floor must be positive"));
    }
    if config.rating.sigma_floor >= config.rating.registration_sigma {
        return Err(anyhow!(
            "Sigma floor must be below the registration sigma"
        ));
    }
    if config.rating.went_under_weight <= 0.0 {
        return Err(anyhow!("Went-under weight must be positive"));
    }

    Ok(())
}
