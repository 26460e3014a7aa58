//! Player directory
//!
//! Players are created at registration and are immutable afterwards;
//! names are unique and nobody is ever deleted.

use crate::error::LeagueError;
use crate::types::{Player, PlayerId};
use crate::utils::generate_player_id;
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for the player directory
pub trait Roster: Send + Sync {
    /// Register a new player under a unique name
    fn register(&self, name: &str) -> crate::error::Result<Player>;

    /// Re-insert a previously registered player, keeping their id.
    /// Used when restoring persisted state.
    fn restore(&self, player: Player) -> crate::error::Result<()>;

    /// Look up a player by id
    fn get(&self, id: PlayerId) -> crate::error::Result<Player>;

    /// Look up a player by exact name
    fn find_by_name(&self, name: &str) -> crate::error::Result<Option<Player>>;

    /// Every registered player, ordered by name ascending
    fn list(&self) -> crate::error::Result<Vec<Player>>;
}

/// In-memory roster implementation
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, player: Player) -> crate::error::Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire roster write lock".to_string(),
            })?;

        if players.values().any(|p| p.name == player.name) {
            return Err(LeagueError::AlreadyRegistered { name: player.name }.into());
        }
        if players.contains_key(&player.id) {
            return Err(LeagueError::InternalError {
                message: format!("Duplicate player id: {}", player.id),
            }
            .into());
        }

        players.insert(player.id, player);
        Ok(())
    }
}

impl Roster for InMemoryRoster {
    fn register(&self, name: &str) -> crate::error::Result<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::InvalidName {
                reason: "name cannot be empty".to_string(),
            }
            .into());
        }

        let player = Player {
            id: generate_player_id(),
            name: name.to_string(),
        };
        self.insert(player.clone())?;
        Ok(player)
    }

    fn restore(&self, player: Player) -> crate::error::Result<()> {
        self.insert(player)
    }

    fn get(&self, id: PlayerId) -> crate::error::Result<Player> {
        let players = self
            .players
            .read()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire roster read lock".to_string(),
            })?;

        players.get(&id).cloned().ok_or_else(|| {
            LeagueError::PlayerNotFound {
                player_id: id.to_string(),
            }
            .into()
        })
    }

    fn find_by_name(&self, name: &str) -> crate::error::Result<Option<Player>> {
        let players = self
            .players
            .read()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire roster read lock".to_string(),
            })?;

        Ok(players.values().find(|p| p.name == name).cloned())
    }

    fn list(&self) -> crate::error::Result<Vec<Player>> {
        let players = self
            .players
            .read()
            .map_err(|_| LeagueError::InternalError {
                message: "Failed to acquire roster read lock".to_string(),
            })?;

        let mut list: Vec<Player> = players.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }
}
