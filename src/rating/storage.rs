//! Rating storage interface and implementations
//!
//! This module defines the interface for persisting and retrieving player
//! ratings, with an in-memory implementation. The production SQL store
//! lives outside this crate and implements the same trait.

use crate::error::LeagueError;
use crate::types::{Mode, PlayerId, Rating};
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for rating storage operations.
///
/// Holds exactly one current rating per (player, mode). A stored rating
/// always has `sigma > 0`; writes violating that are rejected.
pub trait RatingStore: Send + Sync {
    /// Create the rating row for a player in one mode. Called once per
    /// (player, mode) at registration; a second call is rejected.
    fn initialize(&self, player_id: PlayerId, mode: Mode, rating: Rating)
        -> crate::error::Result<()>;

    /// Get a player's current rating. Missing rows are a data-integrity
    /// failure, not a default.
    fn get(&self, player_id: PlayerId, mode: Mode) -> crate::error::Result<Rating>;

    /// Replace a player's current rating snapshot
    fn put(&self, player_id: PlayerId, mode: Mode, rating: Rating) -> crate::error::Result<()>;

    /// Replace several current snapshots as a unit: either every update
    /// applies or none does.
    fn put_all(&self, mode: Mode, updates: &[(PlayerId, Rating)]) -> crate::error::Result<()>;

    /// Top ratings for a mode, ordered by `mu` descending
    fn top_ratings(&self, mode: Mode, limit: usize)
        -> crate::error::Result<Vec<(PlayerId, Rating)>>;

    /// Every rating row for a mode, in no particular order
    fn all_ratings(&self, mode: Mode) -> crate::error::Result<Vec<(PlayerId, Rating)>>;
}

/// In-memory rating storage implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingStore {
    ratings: RwLock<HashMap<(PlayerId, Mode), Rating>>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_sigma(rating: &Rating) -> crate::error::Result<()> {
        if rating.sigma <= 0.0 {
            return Err(LeagueError::DegenerateRating {
                sigma: rating.sigma,
            }
            .into());
        }
        Ok(())
    }
}

impl RatingStore for InMemoryRatingStore {
    fn initialize(
        &self,
        player_id: PlayerId,
        mode: Mode,
        rating: Rating,
    ) -> crate::error::Result<()> {
        Self::check_sigma(&rating)?;

        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire ratings write lock".to_string(),
            })?;

        if ratings.contains_key(&(player_id, mode)) {
            return Err(LeagueError::RatingAlreadyInitialized {
                player_id: player_id.to_string(),
                mode: mode.to_string(),
            }
            .into());
        }

        ratings.insert((player_id, mode), rating);
        Ok(())
    }

    fn get(&self, player_id: PlayerId, mode: Mode) -> crate::error::Result<Rating> {
        let ratings = self
            .ratings
            .read()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire ratings read lock".to_string(),
            })?;

        ratings
            .get(&(player_id, mode))
            .copied()
            .ok_or_else(|| {
                LeagueError::RatingNotFound {
                    player_id: player_id.to_string(),
                    mode: mode.to_string(),
                }
                .into()
            })
    }

    fn put(&self, player_id: PlayerId, mode: Mode, rating: Rating) -> crate::error::Result<()> {
        self.put_all(mode, &[(player_id, rating)])
    }

    fn put_all(&self, mode: Mode, updates: &[(PlayerId, Rating)]) -> crate::error::Result<()> {
        for (_, rating) in updates {
            Self::check_sigma(rating)?;
        }

        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire ratings write lock".to_string(),
            })?;

        // Verify every row exists before touching any of them
        for (player_id, _) in updates {
            if !ratings.contains_key(&(*player_id, mode)) {
                return Err(LeagueError::RatingNotFound {
                    player_id: player_id.to_string(),
                    mode: mode.to_string(),
                }
                .into());
            }
        }

        for (player_id, rating) in updates {
            ratings.insert((*player_id, mode), *rating);
        }

        Ok(())
    }

    fn top_ratings(
        &self,
        mode: Mode,
        limit: usize,
    ) -> crate::error::Result<Vec<(PlayerId, Rating)>> {
        let mut rows = self.all_ratings(mode)?;

        rows.sort_by(|a, b| {
            b.1.mu
                .partial_cmp(&a.1.mu)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(limit);

        Ok(rows)
    }

    fn all_ratings(&self, mode: Mode) -> crate::error::Result<Vec<(PlayerId, Rating)>> {
        let ratings = self
            .ratings
            .read()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire ratings read lock".to_string(),
            })?;

        Ok(ratings
            .iter()
            .filter(|((_, m), _)| *m == mode)
            .map(|((id, _), rating)| (*id, *rating))
            .collect())
    }
}
