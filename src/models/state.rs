//! LedgerState (players, history, registered names) and LedgerError.

use crate::models::history::{HistoryId, ScoreHistoryEntry};
use crate::models::player::{Player, PlayerId, RegisteredPlayer, RegisteredPlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fewest active players allowed at the table.
pub const MIN_PLAYERS: usize = 2;
/// Most active players allowed at the table.
pub const MAX_PLAYERS: usize = 8;
/// Seats in the default roster (after a reset or on first start).
pub const DEFAULT_PLAYER_COUNT: usize = 4;
/// Lowest running total a player may reach.
pub const MIN_SCORE: i32 = -99_999;
/// Highest running total a player may reach.
pub const MAX_SCORE: i32 = 99_999;

/// Errors that can occur during ledger operations.
///
/// Not-found variants (and `ZeroDelta`) are silent no-ops: the caller gets an explicit
/// result but nothing is reported to the user. Everything else carries a notice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerError {
    /// Adding a player would exceed the table size.
    TooManyPlayers { max: usize },
    /// Removing a player would leave too few seats.
    TooFewPlayers { min: usize },
    /// The resulting score would leave `[min, max]`.
    ScoreOutOfRange { attempted: i64, min: i32, max: i32 },
    /// Another active player already uses this name.
    DuplicatePlayerName,
    /// Another registered name is identical.
    DuplicateRegisteredName,
    /// Name is empty after trimming.
    EmptyName,
    /// Only the newest surviving entry of a player can be undone.
    NotLatestEntry,
    /// A zero delta records nothing.
    ZeroDelta,
    PlayerNotFound(PlayerId),
    HistoryNotFound(HistoryId),
    RegisteredPlayerNotFound(RegisteredPlayerId),
}

impl LedgerError {
    /// True for the no-op conditions that are never reported to the user.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            LedgerError::ZeroDelta
                | LedgerError::PlayerNotFound(_)
                | LedgerError::HistoryNotFound(_)
                | LedgerError::RegisteredPlayerNotFound(_)
        )
    }

    /// Human-readable reason to show the user, or `None` for silent no-ops.
    pub fn notice(&self) -> Option<String> {
        if self.is_silent() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::TooManyPlayers { max } => {
                write!(f, "At most {} players are allowed", max)
            }
            LedgerError::TooFewPlayers { min } => {
                write!(f, "At least {} players are required", min)
            }
            LedgerError::ScoreOutOfRange { min, max, .. } => {
                write!(f, "Score must stay between {} and {}", min, max)
            }
            LedgerError::DuplicatePlayerName => write!(f, "Another player already has this name"),
            LedgerError::DuplicateRegisteredName => write!(f, "This name is already registered"),
            LedgerError::EmptyName => write!(f, "Name must not be empty"),
            LedgerError::NotLatestEntry => {
                write!(f, "Only the latest entry of a player can be undone")
            }
            LedgerError::ZeroDelta => write!(f, "Nothing to add"),
            LedgerError::PlayerNotFound(_) => write!(f, "Player not found"),
            LedgerError::HistoryNotFound(_) => write!(f, "History entry not found"),
            LedgerError::RegisteredPlayerNotFound(_) => write!(f, "Registered player not found"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// The default four-seat roster: ids "1".."4", names Player1..Player4, scores zero.
pub fn default_players() -> Vec<Player> {
    (1..=DEFAULT_PLAYER_COUNT)
        .map(|n| Player::with_id(n.to_string(), Player::seat_name(n)))
        .collect()
}

/// Everything the scoreboard knows: seats, adjustment log and reusable names.
///
/// `history` is newest-first (new entries are prepended). Every entry's `player_name`
/// equals its owner's current name, and no entry outlives its player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    /// Seating order; stable across renames.
    pub players: Vec<Player>,
    pub history: Vec<ScoreHistoryEntry>,
    pub registered_players: Vec<RegisteredPlayer>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            players: default_players(),
            history: Vec::new(),
            registered_players: Vec::new(),
        }
    }
}

impl LedgerState {
    /// Active player by id.
    pub fn get_player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable reference to an active player by id.
    pub fn get_player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn can_add_player(&self) -> bool {
        self.players.len() < MAX_PLAYERS
    }

    pub fn can_remove_player(&self) -> bool {
        self.players.len() > MIN_PLAYERS
    }

    /// Seat a new player named `Player{N}` (N = current count + 1) with score zero.
    pub fn add_player(&mut self) -> Result<&Player, LedgerError> {
        if !self.can_add_player() {
            return Err(LedgerError::TooManyPlayers { max: MAX_PLAYERS });
        }
        let name = Player::seat_name(self.players.len() + 1);
        self.players.push(Player::new(name));
        let idx = self.players.len() - 1;
        Ok(&self.players[idx])
    }

    /// Remove the last-seated player and every history entry that belongs to them.
    /// Returns the removed player.
    pub fn remove_last_player(&mut self) -> Result<Player, LedgerError> {
        if !self.can_remove_player() {
            return Err(LedgerError::TooFewPlayers { min: MIN_PLAYERS });
        }
        let removed = match self.players.pop() {
            Some(p) => p,
            None => return Err(LedgerError::TooFewPlayers { min: MIN_PLAYERS }),
        };
        self.history.retain(|h| h.player_id != removed.id);
        Ok(removed)
    }

    /// Rename a player and rewrite `player_name` on all of their history entries.
    ///
    /// The name is trimmed. Blank names and names used by another active player are
    /// rejected without touching anything.
    pub fn update_player_name(&mut self, id: &str, name: &str) -> Result<(), LedgerError> {
        if self.get_player(id).is_none() {
            return Err(LedgerError::PlayerNotFound(id.to_string()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.players.iter().any(|p| p.id != id && p.name == name) {
            return Err(LedgerError::DuplicatePlayerName);
        }
        if let Some(p) = self.get_player_mut(id) {
            p.name = name.to_string();
        }
        for h in self.history.iter_mut().filter(|h| h.player_id == id) {
            h.player_name = name.to_string();
        }
        Ok(())
    }

    /// Back to the default roster with an empty history. Registered names are kept.
    pub fn reset_all(&mut self) {
        self.players = default_players();
        self.history.clear();
    }

    /// Drop history entries whose player is no longer seated. Returns how many were dropped.
    pub fn prune_orphaned_history(&mut self) -> usize {
        let seated: HashSet<&str> = self.players.iter().map(|p| p.id.as_str()).collect();
        let before = self.history.len();
        self.history.retain(|h| seated.contains(h.player_id.as_str()));
        before - self.history.len()
    }

    /// Copy each owner's current name onto their history entries. Returns how many
    /// entries changed.
    pub fn sync_history_names(&mut self) -> usize {
        let mut changed = 0;
        for h in &mut self.history {
            if let Some(p) = self.players.iter().find(|p| p.id == h.player_id) {
                if h.player_name != p.name {
                    h.player_name = p.name.clone();
                    changed += 1;
                }
            }
        }
        changed
    }
}
