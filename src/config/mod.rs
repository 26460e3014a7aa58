//! Configuration management for the table-league service
//!
//! This module handles all configuration loading from environment variables,
//! TOML files, validation, and default values for the league service.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::RatingSettings;
