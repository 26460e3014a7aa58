//! Append-only game history
//!
//! Match records are created once, after a successful rating update, and
//! never mutated or deleted. Recent-game queries return newest first.

use crate::error::LeagueError;
use crate::types::{SoloGame, TeamGame};
use std::sync::RwLock;

/// Trait for the append-only game log
pub trait GameLog: Send + Sync {
    /// Append a solo game record
    fn append_solo(&self, game: SoloGame) -> crate::error::Result<()>;

    /// Append a team game record
    fn append_team(&self, game: TeamGame) -> crate::error::Result<()>;

    /// Most recent solo games, newest first
    fn recent_solo(&self, limit: usize) -> crate::error::Result<Vec<SoloGame>>;

    /// Most recent team games, newest first
    fn recent_team(&self, limit: usize) -> crate::error::Result<Vec<TeamGame>>;
}

/// In-memory game log implementation
#[derive(Debug, Default)]
pub struct InMemoryGameLog {
    solo: RwLock<Vec<SoloGame>>,
    team: RwLock<Vec<TeamGame>>,
}

impl InMemoryGameLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameLog for InMemoryGameLog {
    fn append_solo(&self, game: SoloGame) -> crate::error::Result<()> {
        let mut solo = self.solo.write().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire solo game log write lock".to_string(),
        })?;

        solo.push(game);
        Ok(())
    }

    fn append_team(&self, game: TeamGame) -> crate::error::Result<()> {
        let mut team = self.team.write().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire team game log write lock".to_string(),
        })?;

        team.push(game);
        Ok(())
    }

    fn recent_solo(&self, limit: usize) -> crate::error::Result<Vec<SoloGame>> {
        let solo = self.solo.read().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire solo game log read lock".to_string(),
        })?;

        // Reverse first so the stable sort keeps later appends ahead of
        // earlier ones when timestamps collide
        let mut games: Vec<SoloGame> = solo.iter().rev().cloned().collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games.truncate(limit);
        Ok(games)
    }

    fn recent_team(&self, limit: usize) -> crate::error::Result<Vec<TeamGame>> {
        let team = self.team.read().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire team game log read lock".to_string(),
        })?;

        let mut games: Vec<TeamGame> = team.iter().rev().cloned().collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games.truncate(limit);
        Ok(games)
    }
}
