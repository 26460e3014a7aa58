//! Rating engine trait
//!
//! This module defines the interface for rating updates so the league
//! manager can be exercised against hand-constructed ratings in tests.

use crate::types::Rating;

/// Trait for computing rating updates after a decided match.
///
/// Implementations are pure: no hidden state, no randomness. Identical
/// inputs must produce identical outputs.
pub trait RatingEngine: Send + Sync {
    /// Compute new ratings for every participant of a decided match.
    ///
    /// # Arguments
    /// * `winners` - Current ratings of the winning side, one entry per
    ///   player (one for solo, two for team)
    /// * `losers` - Current ratings of the losing side, same shape
    /// * `went_under` - Whether the game ended under the mercy rule
    ///
    /// # Returns
    /// New ratings in the same order as the inputs. Fails if any input
    /// rating carries a non-positive uncertainty.
    fn rate(
        &self,
        winners: &[Rating],
        losers: &[Rating],
        went_under: bool,
    ) -> crate::error::Result<(Vec<Rating>, Vec<Rating>)>;

    /// Get the bootstrap prior for new players
    fn initial_rating(&self) -> Rating;
}
