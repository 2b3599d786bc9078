//! Player (active seat) and RegisteredPlayer (reusable name) data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for an active player.
pub type PlayerId = String;

/// Opaque identifier for a registered (address-book) name.
pub type RegisteredPlayerId = String;

/// A seated participant with a live running total.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: i32,
}

impl Player {
    /// Create a new player with a fresh id and a score of zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Create a player with a known id (the default roster uses "1".."4").
    pub fn with_id(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
        }
    }

    /// Auto-generated display name for the seat at 1-based position `n`.
    pub fn seat_name(n: usize) -> String {
        format!("Player{n}")
    }
}

/// An entry in the roster of reusable names. Not linked to any active player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RegisteredPlayer {
    pub id: RegisteredPlayerId,
    pub name: String,
}

impl RegisteredPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}
