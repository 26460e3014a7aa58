//! Error types for the league service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific league scenarios
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("No player registered under name: {name}")]
    UnknownPlayer { name: String },

    #[error("Player already registered: {name}")]
    AlreadyRegistered { name: String },

    #[error("Invalid player name: {reason}")]
    InvalidName { reason: String },

    #[error("No {mode} rating for player {player_id}")]
    RatingNotFound { player_id: String, mode: String },

    #[error("{mode} rating already initialized for player {player_id}")]
    RatingAlreadyInitialized { player_id: String, mode: String },

    #[error("Degenerate rating uncertainty: {sigma}")]
    DegenerateRating { sigma: f64 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
