//! Match validation, orientation, and history
//!
//! This module validates raw match submissions, orients them as
//! winner/loser before any rating math runs, and keeps the append-only
//! game log.

pub mod history;
pub mod outcome;

// Re-export commonly used types
pub use history::{GameLog, InMemoryGameLog};
pub use outcome::{orient_solo, orient_team, SoloMatchup, TeamMatchup};
