//! Rating system: TrueSkill-family updates over per-player Gaussian beliefs
//!
//! This module provides the rating engine trait, the TrueSkill update
//! implementation, and the rating storage interface.

pub mod engine;
pub mod storage;
pub mod true_skill;

// Re-export commonly used types
pub use engine::RatingEngine;
pub use storage::{InMemoryRatingStore, RatingStore};
pub use true_skill::{TrueSkillConfig, TrueSkillEngine};
