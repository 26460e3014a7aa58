//! Common types used throughout the league service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = Uuid;

/// Rating track a player competes on. Solo and team skill are tracked
/// independently and diverge freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Solo,
    Team,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Solo => write!(f, "solo"),
            Mode::Team => write!(f, "team"),
        }
    }
}

/// Skill belief snapshot for one player on one mode.
///
/// `mu` is the estimated mean skill, `sigma` the uncertainty in that
/// estimate. Every update produces a new snapshot; snapshots are never
/// mutated in place. Invariant: `sigma > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }
}

/// Registered player. Immutable after registration; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// One row of the standings table: a player with their current rating,
/// ordered by `mu` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub player: Player,
    pub rating: Rating,
}

/// Recorded 1v1 game. Append-only; created once after a successful
/// rating update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoloGame {
    pub blue: PlayerId,
    pub red: PlayerId,
    pub blue_score: u32,
    pub red_score: u32,
    pub went_under: bool,
    pub created_at: DateTime<Utc>,
}

/// Recorded 2v2 game. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGame {
    pub blue: [PlayerId; 2],
    pub red: [PlayerId; 2],
    pub blue_score: u32,
    pub red_score: u32,
    pub went_under: bool,
    pub created_at: DateTime<Utc>,
}

/// Solo game with participant names resolved, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoloGameView {
    pub blue: String,
    pub red: String,
    pub blue_score: u32,
    pub red_score: u32,
    pub went_under: bool,
    pub created_at: DateTime<Utc>,
}

/// Team game with participant names resolved, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamGameView {
    pub blue: [String; 2],
    pub red: [String; 2],
    pub blue_score: u32,
    pub red_score: u32,
    pub went_under: bool,
    pub created_at: DateTime<Utc>,
}
