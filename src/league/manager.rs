//! League manager
//!
//! The application-facing core: registration, match submission, standings,
//! and recent results. The manager owns the fetch -> compute -> persist
//! discipline around the rating engine and serializes concurrent
//! submissions that share a participant.

use crate::config::RatingSettings;
use crate::error::LeagueError;
use crate::game::history::{GameLog, InMemoryGameLog};
use crate::game::outcome;
use crate::league::roster::{InMemoryRoster, Roster};
use crate::rating::engine::RatingEngine;
use crate::rating::storage::{InMemoryRatingStore, RatingStore};
use crate::rating::true_skill::{TrueSkillConfig, TrueSkillEngine};
use crate::types::{
    Mode, Player, PlayerId, Rating, SoloGame, SoloGameView, StandingsEntry, TeamGame, TeamGameView,
};
use crate::utils::current_timestamp;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

/// Running counters for the current session
#[derive(Debug, Clone, Copy, Default)]
pub struct LeagueStats {
    pub players_registered: u64,
    pub solo_games_recorded: u64,
    pub team_games_recorded: u64,
}

/// Per-player lock table serializing match submissions that share a
/// participant. Locks are always taken in sorted id order, so two
/// submissions can never deadlock; matches over disjoint player sets
/// run in parallel.
#[derive(Debug, Default)]
struct PlayerLocks {
    table: Mutex<HashMap<PlayerId, Arc<Mutex<()>>>>,
}

impl PlayerLocks {
    /// Run `f` while holding exclusive locks for every listed player.
    /// All locks are released when `f` returns, on every exit path.
    fn with_exclusive<T>(
        &self,
        ids: &[PlayerId],
        f: impl FnOnce() -> crate::error::Result<T>,
    ) -> crate::error::Result<T> {
        let mut sorted = ids.to_vec();
        sorted.sort();

        let mutexes: Vec<Arc<Mutex<()>>> = {
            let mut table = self.table.lock().map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire player lock table".to_string(),
            })?;
            sorted
                .iter()
                .map(|id| table.entry(*id).or_default().clone())
                .collect()
        };

        let mut guards = Vec::with_capacity(mutexes.len());
        for mutex in &mutexes {
            guards.push(mutex.lock().map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire player lock".to_string(),
            })?);
        }

        f()
    }
}

/// The main league manager
pub struct LeagueManager {
    roster: Arc<dyn Roster>,
    ratings: Arc<dyn RatingStore>,
    games: Arc<dyn GameLog>,
    engine: Arc<dyn RatingEngine>,
    /// Uncertainty stored at registration, independent of the engine's
    /// bootstrap prior
    registration_sigma: f64,
    locks: PlayerLocks,
    stats: Arc<RwLock<LeagueStats>>,
}

impl LeagueManager {
    /// Create a manager with in-memory components and a TrueSkill engine
    /// built from the given settings
    pub fn new(settings: &RatingSettings) -> crate::error::Result<Self> {
        let engine = TrueSkillEngine::new(TrueSkillConfig::from(settings))?;

        Ok(Self::with_components(
            Arc::new(InMemoryRoster::new()),
            Arc::new(InMemoryRatingStore::new()),
            Arc::new(InMemoryGameLog::new()),
            Arc::new(engine),
            settings.registration_sigma,
        ))
    }

    /// Create a manager from explicit components
    pub fn with_components(
        roster: Arc<dyn Roster>,
        ratings: Arc<dyn RatingStore>,
        games: Arc<dyn GameLog>,
        engine: Arc<dyn RatingEngine>,
        registration_sigma: f64,
    ) -> Self {
        Self {
            roster,
            ratings,
            games,
            engine,
            registration_sigma,
            locks: PlayerLocks::default(),
            stats: Arc::new(RwLock::new(LeagueStats::default())),
        }
    }

    pub(crate) fn roster(&self) -> &Arc<dyn Roster> {
        &self.roster
    }

    pub(crate) fn ratings(&self) -> &Arc<dyn RatingStore> {
        &self.ratings
    }

    pub(crate) fn games(&self) -> &Arc<dyn GameLog> {
        &self.games
    }

    /// Register a new player and bootstrap their solo and team ratings.
    ///
    /// Both ratings start from the engine's prior mean, with the stored
    /// uncertainty fixed to the configured registration constant. The two
    /// mode ratings are independent from this point on.
    pub fn register_player(&self, name: &str) -> crate::error::Result<Player> {
        let player = self.roster.register(name)?;

        let mut rating = self.engine.initial_rating();
        rating.sigma = self.registration_sigma;

        self.ratings.initialize(player.id, Mode::Solo, rating)?;
        self.ratings.initialize(player.id, Mode::Team, rating)?;

        self.bump_stats(|s| s.players_registered += 1)?;
        info!(
            "Registered player '{}' with rating {:.1}±{:.1}",
            player.name, rating.mu, rating.sigma
        );

        Ok(player)
    }

    /// Record a solo game: validate, update both ratings, append the record
    pub fn record_solo_game(
        &self,
        blue: PlayerId,
        red: PlayerId,
        blue_score: u32,
        red_score: u32,
        went_under: bool,
    ) -> crate::error::Result<SoloGame> {
        // Reject before any lock is taken or any rating is touched
        let matchup = outcome::orient_solo(blue, red, blue_score, red_score)?;
        self.roster.get(blue)?;
        self.roster.get(red)?;

        let game = self.locks.with_exclusive(&[blue, red], || {
            let winner = self.fetch_rating(matchup.winner, Mode::Solo)?;
            let loser = self.fetch_rating(matchup.loser, Mode::Solo)?;

            let (new_winners, new_losers) = self.engine.rate(&[winner], &[loser], went_under)?;

            self.ratings.put_all(
                Mode::Solo,
                &[
                    (matchup.winner, new_winners[0]),
                    (matchup.loser, new_losers[0]),
                ],
            )?;

            let game = SoloGame {
                blue,
                red,
                blue_score,
                red_score,
                went_under,
                created_at: current_timestamp(),
            };
            self.games.append_solo(game.clone())?;

            info!(
                "Recorded solo game {}-{}: winner {:.1} -> {:.1}, loser {:.1} -> {:.1}",
                blue_score, red_score, winner.mu, new_winners[0].mu, loser.mu, new_losers[0].mu
            );
            Ok(game)
        })?;

        self.bump_stats(|s| s.solo_games_recorded += 1)?;
        Ok(game)
    }

    /// Record a team game: validate, update all four ratings, append the
    /// record
    pub fn record_team_game(
        &self,
        blue: [PlayerId; 2],
        red: [PlayerId; 2],
        blue_score: u32,
        red_score: u32,
        went_under: bool,
    ) -> crate::error::Result<TeamGame> {
        let matchup = outcome::orient_team(blue, red, blue_score, red_score)?;
        for id in blue.iter().chain(red.iter()) {
            self.roster.get(*id)?;
        }

        let participants = [blue[0], blue[1], red[0], red[1]];
        let game = self.locks.with_exclusive(&participants, || {
            let winners = [
                self.fetch_rating(matchup.winners[0], Mode::Team)?,
                self.fetch_rating(matchup.winners[1], Mode::Team)?,
            ];
            let losers = [
                self.fetch_rating(matchup.losers[0], Mode::Team)?,
                self.fetch_rating(matchup.losers[1], Mode::Team)?,
            ];

            let (new_winners, new_losers) = self.engine.rate(&winners, &losers, went_under)?;

            self.ratings.put_all(
                Mode::Team,
                &[
                    (matchup.winners[0], new_winners[0]),
                    (matchup.winners[1], new_winners[1]),
                    (matchup.losers[0], new_losers[0]),
                    (matchup.losers[1], new_losers[1]),
                ],
            )?;

            let game = TeamGame {
                blue,
                red,
                blue_score,
                red_score,
                went_under,
                created_at: current_timestamp(),
            };
            self.games.append_team(game.clone())?;

            info!(
                "Recorded team game {}-{}: winning side to {:.1}/{:.1}",
                blue_score, red_score, new_winners[0].mu, new_winners[1].mu
            );
            Ok(game)
        })?;

        self.bump_stats(|s| s.team_games_recorded += 1)?;
        Ok(game)
    }

    /// Top players for a mode, ordered by `mu` descending
    pub fn standings(&self, mode: Mode, limit: usize) -> crate::error::Result<Vec<StandingsEntry>> {
        let rows = self.ratings.top_ratings(mode, limit)?;

        let mut entries = Vec::with_capacity(rows.len());
        for (player_id, rating) in rows {
            entries.push(StandingsEntry {
                player: self.roster.get(player_id)?,
                rating,
            });
        }
        Ok(entries)
    }

    /// Every registered player, name ascending
    pub fn players(&self) -> crate::error::Result<Vec<Player>> {
        self.roster.list()
    }

    /// Look up a player by exact name
    pub fn player_by_name(&self, name: &str) -> crate::error::Result<Player> {
        self.roster.find_by_name(name)?.ok_or_else(|| {
            LeagueError::UnknownPlayer {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// A player's current rating for a mode
    pub fn rating(&self, player_id: PlayerId, mode: Mode) -> crate::error::Result<Rating> {
        self.ratings.get(player_id, mode)
    }

    /// Recent solo games with names resolved, newest first
    pub fn recent_solo_games(&self, limit: usize) -> crate::error::Result<Vec<SoloGameView>> {
        let games = self.games.recent_solo(limit)?;

        let mut views = Vec::with_capacity(games.len());
        for game in games {
            views.push(SoloGameView {
                blue: self.roster.get(game.blue)?.name,
                red: self.roster.get(game.red)?.name,
                blue_score: game.blue_score,
                red_score: game.red_score,
                went_under: game.went_under,
                created_at: game.created_at,
            });
        }
        Ok(views)
    }

    /// Recent team games with names resolved, newest first
    pub fn recent_team_games(&self, limit: usize) -> crate::error::Result<Vec<TeamGameView>> {
        let games = self.games.recent_team(limit)?;

        let mut views = Vec::with_capacity(games.len());
        for game in games {
            views.push(TeamGameView {
                blue: [
                    self.roster.get(game.blue[0])?.name,
                    self.roster.get(game.blue[1])?.name,
                ],
                red: [
                    self.roster.get(game.red[0])?.name,
                    self.roster.get(game.red[1])?.name,
                ],
                blue_score: game.blue_score,
                red_score: game.red_score,
                went_under: game.went_under,
                created_at: game.created_at,
            });
        }
        Ok(views)
    }

    /// Session counters
    pub fn stats(&self) -> crate::error::Result<LeagueStats> {
        let stats = self.stats.read().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire stats lock".to_string(),
        })?;
        Ok(*stats)
    }

    /// Fetch a rating, logging the integrity failure if the row is missing
    fn fetch_rating(&self, player_id: PlayerId, mode: Mode) -> crate::error::Result<Rating> {
        self.ratings.get(player_id, mode).map_err(|e| {
            warn!(
                "Missing {} rating for registered player {}: registration did not bootstrap it",
                mode, player_id
            );
            e
        })
    }

    fn bump_stats(&self, f: impl FnOnce(&mut LeagueStats)) -> crate::error::Result<()> {
        let mut stats = self.stats.write().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire stats lock".to_string(),
        })?;
        f(&mut stats);
        Ok(())
    }
}
