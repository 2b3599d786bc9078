//! Durable key-value storage for the ledger snapshot.
//!
//! The snapshot is three independently keyed JSON arrays: players, history and
//! registered names. Loading never fails; anything missing or unreadable falls back to
//! its default.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::models::{
    default_players, LedgerState, Player, RegisteredPlayer, ScoreHistoryEntry, MAX_PLAYERS,
    MAX_SCORE, MIN_PLAYERS, MIN_SCORE,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

pub const PLAYERS_KEY: &str = "players";
pub const HISTORY_KEY: &str = "history";
pub const REGISTERED_PLAYERS_KEY: &str = "registeredPlayers";

/// Errors raised by a store or while (de)serializing a snapshot collection.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed durable store (browser-style local storage).
pub trait KeyValueStore {
    /// Stored value for `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load a ledger snapshot, falling back per collection to its default.
///
/// A player list outside the seat limits, with a score outside `[MIN_SCORE, MAX_SCORE]` or
/// with a repeated id is treated as malformed; the default roster then starts with an empty
/// history. Otherwise history entries whose player is not seated are dropped, and the rest
/// take their owner's current name.
pub fn load_state(store: &impl KeyValueStore) -> LedgerState {
    let stored_players = match load_collection::<Player>(store, PLAYERS_KEY) {
        Some(players) => match check_roster(&players) {
            Ok(()) => Some(players),
            Err(reason) => {
                log::warn!("Stored roster is invalid ({}); using default players", reason);
                None
            }
        },
        None => None,
    };
    let mut history =
        load_collection::<ScoreHistoryEntry>(store, HISTORY_KEY).unwrap_or_default();
    let players = match stored_players {
        Some(players) => players,
        None => {
            // Whatever history exists was recorded against another roster.
            if !history.is_empty() {
                log::warn!(
                    "Discarding {} history entries with the stored roster",
                    history.len()
                );
                history.clear();
            }
            default_players()
        }
    };
    let registered_players =
        load_collection::<RegisteredPlayer>(store, REGISTERED_PLAYERS_KEY).unwrap_or_default();

    let mut state = LedgerState {
        players,
        history,
        registered_players,
    };
    let dropped = state.prune_orphaned_history();
    if dropped > 0 {
        log::warn!("Dropped {} history entries of players that are not seated", dropped);
    }
    let renamed = state.sync_history_names();
    if renamed > 0 {
        log::warn!("Corrected the player name on {} history entries", renamed);
    }
    log::info!(
        "Loaded ledger: {} players, {} history entries, {} registered names",
        state.players.len(),
        state.history.len(),
        state.registered_players.len()
    );
    state
}

/// Write all three collections. Every key is attempted; the first failure is returned.
pub fn save_state(store: &mut impl KeyValueStore, state: &LedgerState) -> Result<(), StorageError> {
    let results = [
        save_collection(store, PLAYERS_KEY, &state.players),
        save_collection(store, HISTORY_KEY, &state.history),
        save_collection(store, REGISTERED_PLAYERS_KEY, &state.registered_players),
    ];
    results.into_iter().collect()
}

/// Why a stored roster cannot be used as-is.
fn check_roster(players: &[Player]) -> Result<(), String> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(format!(
            "{} players, allowed {}-{}",
            players.len(),
            MIN_PLAYERS,
            MAX_PLAYERS
        ));
    }
    if let Some(p) = players
        .iter()
        .find(|p| !(MIN_SCORE..=MAX_SCORE).contains(&p.score))
    {
        return Err(format!(
            "player {} has score {}, allowed {} to {}",
            p.id, p.score, MIN_SCORE, MAX_SCORE
        ));
    }
    let mut seen = HashSet::new();
    if let Some(p) = players.iter().find(|p| !seen.insert(p.id.as_str())) {
        return Err(format!("player id {} appears more than once", p.id));
    }
    Ok(())
}

fn load_collection<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<Vec<T>> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("No stored {}; using default", key);
            return None;
        }
        Err(e) => {
            log::warn!("Failed to read {}: {}; using default", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(e) => {
            log::warn!("Stored {} is malformed ({}); using default", key, e);
            None
        }
    }
}

fn save_collection<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(items).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}
