//! League orchestration: roster, match pipeline, standings, snapshots

pub mod manager;
pub mod roster;
pub mod snapshot;

// Re-export commonly used types
pub use manager::{LeagueManager, LeagueStats};
pub use roster::{InMemoryRoster, Roster};
pub use snapshot::LeagueSnapshot;
