//! Scoreboard web app: library with the score ledger, its storage and business logic.

pub mod export;
pub mod ledger;
pub mod logic;
pub mod models;
pub mod storage;

pub use ledger::ScoreLedger;
pub use logic::{
    add_registered_player, add_score, check_registered_name, delete_registered_player,
    history_by_turn, is_undoable, player_history, undo_history, undoable_history_ids,
    unseated_registered_names, update_registered_player, Turn,
};
pub use models::{
    default_players, HistoryId, LedgerError, LedgerState, Player, PlayerId, RegisteredPlayer,
    RegisteredPlayerId, ScoreHistoryEntry, DEFAULT_PLAYER_COUNT, MAX_PLAYERS, MAX_SCORE,
    MIN_PLAYERS, MIN_SCORE,
};
pub use storage::{
    load_state, save_state, FileStore, KeyValueStore, MemoryStore, StorageError,
};
