//! Data structures for the scoreboard: players, score history, registered names, ledger state.

mod history;
mod player;
mod state;

pub use history::{HistoryId, ScoreHistoryEntry};
pub use player::{Player, PlayerId, RegisteredPlayer, RegisteredPlayerId};
pub use state::{
    default_players, LedgerError, LedgerState, DEFAULT_PLAYER_COUNT, MAX_PLAYERS, MAX_SCORE,
    MIN_PLAYERS, MIN_SCORE,
};
