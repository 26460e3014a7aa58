//! Table League - skill rating tracker for table matches
//!
//! This crate tracks competitive skill ratings for solo (1v1) and team
//! (2v2) table matches, updating per-player Gaussian skill beliefs with a
//! TrueSkill-family Bayesian update and surfacing standings and recent
//! results.

pub mod config;
pub mod error;
pub mod game;
pub mod league;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LeagueError, Result};
pub use types::*;

// Re-export key components
pub use league::{LeagueManager, LeagueSnapshot};
pub use rating::{RatingEngine, RatingStore, TrueSkillConfig, TrueSkillEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
