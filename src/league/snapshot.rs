//! League state snapshots
//!
//! The CLI persists the whole league (roster, current ratings, game log)
//! as a JSON document between invocations. A snapshot is captured from a
//! manager's stores and restored by replaying it into fresh in-memory
//! components.

use crate::config::RatingSettings;
use crate::error::Result;
use crate::game::history::{GameLog, InMemoryGameLog};
use crate::league::manager::LeagueManager;
use crate::league::roster::{InMemoryRoster, Roster};
use crate::rating::storage::{InMemoryRatingStore, RatingStore};
use crate::rating::true_skill::{TrueSkillConfig, TrueSkillEngine};
use crate::types::{Mode, Player, PlayerId, Rating, SoloGame, TeamGame};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Serializable image of the whole league state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub players: Vec<Player>,
    pub solo_ratings: Vec<(PlayerId, Rating)>,
    pub team_ratings: Vec<(PlayerId, Rating)>,
    pub solo_games: Vec<SoloGame>,
    pub team_games: Vec<TeamGame>,
}

impl LeagueSnapshot {
    /// Capture the current state of a manager
    pub fn capture(manager: &LeagueManager) -> Result<Self> {
        // Game logs are stored newest first by the recent queries;
        // snapshots keep chronological order
        let mut solo_games = manager.games().recent_solo(usize::MAX)?;
        solo_games.reverse();
        let mut team_games = manager.games().recent_team(usize::MAX)?;
        team_games.reverse();

        Ok(Self {
            players: manager.roster().list()?,
            solo_ratings: manager.ratings().all_ratings(Mode::Solo)?,
            team_ratings: manager.ratings().all_ratings(Mode::Team)?,
            solo_games,
            team_games,
        })
    }

    /// Rebuild a manager from this snapshot
    pub fn restore(self, settings: &RatingSettings) -> Result<LeagueManager> {
        let roster = Arc::new(InMemoryRoster::new());
        let ratings = Arc::new(InMemoryRatingStore::new());
        let games = Arc::new(InMemoryGameLog::new());
        let engine = Arc::new(TrueSkillEngine::new(TrueSkillConfig::from(settings))?);

        for player in self.players {
            roster.restore(player)?;
        }
        for (player_id, rating) in self.solo_ratings {
            ratings.initialize(player_id, Mode::Solo, rating)?;
        }
        for (player_id, rating) in self.team_ratings {
            ratings.initialize(player_id, Mode::Team, rating)?;
        }
        for game in self.solo_games {
            games.append_solo(game)?;
        }
        for game in self.team_games {
            games.append_team(game)?;
        }

        Ok(LeagueManager::with_components(
            roster,
            ratings,
            games,
            engine,
            settings.registration_sigma,
        ))
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read league state: {}", path.display()))?;
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse league state: {}", path.display()))?;
        Ok(snapshot)
    }

    /// Write the snapshot to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write league state: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_restore_preserves_state() {
        let settings = RatingSettings::default();
        let league = LeagueManager::new(&settings).unwrap();

        let alice = league.register_player("alice").unwrap();
        let bob = league.register_player("bob").unwrap();
        league
            .record_solo_game(alice.id, bob.id, 10, 3, false)
            .unwrap();

        let snapshot = LeagueSnapshot::capture(&league).unwrap();
        let restored = snapshot.restore(&settings).unwrap();

        assert_eq!(
            restored.rating(alice.id, Mode::Solo).unwrap(),
            league.rating(alice.id, Mode::Solo).unwrap()
        );
        assert_eq!(restored.players().unwrap(), league.players().unwrap());
        assert_eq!(restored.recent_solo_games(5).unwrap().len(), 1);

        // Restored state accepts further games
        restored
            .record_solo_game(bob.id, alice.id, 10, 8, false)
            .unwrap();
    }

    #[test]
    fn test_save_load_round_trip() {
        let settings = RatingSettings::default();
        let league = LeagueManager::new(&settings).unwrap();
        league.register_player("alice").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.json");

        let snapshot = LeagueSnapshot::capture(&league).unwrap();
        snapshot.save(&path).unwrap();

        let loaded = LeagueSnapshot::load(&path).unwrap();
        assert_eq!(loaded.players.len(), 1);
        assert_eq!(loaded.solo_ratings.len(), 1);
        assert_eq!(loaded.team_ratings.len(), 1);
    }
}
