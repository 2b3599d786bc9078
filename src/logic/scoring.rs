//! Score adjustments and undo.

use crate::models::{LedgerError, LedgerState, ScoreHistoryEntry, MAX_SCORE, MIN_SCORE};
use std::collections::HashSet;

/// Apply `delta` to a player's score and prepend the matching history entry.
///
/// The new total must stay within `[MIN_SCORE, MAX_SCORE]`; otherwise nothing changes.
/// The entry's sequence number is the count of the player's existing entries plus one.
pub fn add_score<'a>(
    state: &'a mut LedgerState,
    player_id: &str,
    delta: i32,
) -> Result<&'a ScoreHistoryEntry, LedgerError> {
    let current = state
        .get_player(player_id)
        .ok_or_else(|| LedgerError::PlayerNotFound(player_id.to_string()))?
        .score;
    if delta == 0 {
        return Err(LedgerError::ZeroDelta);
    }

    let attempted = i64::from(current) + i64::from(delta);
    if attempted < i64::from(MIN_SCORE) || attempted > i64::from(MAX_SCORE) {
        return Err(LedgerError::ScoreOutOfRange {
            attempted,
            min: MIN_SCORE,
            max: MAX_SCORE,
        });
    }

    let sequence_number = state
        .history
        .iter()
        .filter(|h| h.player_id == player_id)
        .count() as u32
        + 1;

    let player = state
        .get_player_mut(player_id)
        .ok_or_else(|| LedgerError::PlayerNotFound(player_id.to_string()))?;
    // In range, so it fits in i32.
    player.score = attempted as i32;
    let entry = ScoreHistoryEntry::new(player, delta, sequence_number);

    state.history.insert(0, entry);
    Ok(&state.history[0])
}

/// Reverse exactly one history entry: the owner's score goes back to
/// `total_score - score` and the entry is removed.
///
/// Only the newest surviving entry of a player may be undone, which keeps every
/// player's score equal to the sum of their remaining deltas.
pub fn undo_history(
    state: &mut LedgerState,
    history_id: &str,
) -> Result<ScoreHistoryEntry, LedgerError> {
    let idx = state
        .history
        .iter()
        .position(|h| h.id == history_id)
        .ok_or_else(|| LedgerError::HistoryNotFound(history_id.to_string()))?;
    if !is_undoable(state, history_id) {
        return Err(LedgerError::NotLatestEntry);
    }

    let previous = state.history[idx].previous_score();
    let player_id = state.history[idx].player_id.clone();
    let player = state
        .get_player_mut(&player_id)
        .ok_or(LedgerError::PlayerNotFound(player_id))?;
    player.score = previous;

    Ok(state.history.remove(idx))
}

/// True if `history_id` is the newest surviving entry of its player.
pub fn is_undoable(state: &LedgerState, history_id: &str) -> bool {
    let Some(entry) = state.history.iter().find(|h| h.id == history_id) else {
        return false;
    };
    // History is newest-first, so the first match per player is its newest entry.
    state
        .history
        .iter()
        .find(|h| h.player_id == entry.player_id)
        .is_some_and(|newest| newest.id == entry.id)
}

/// Ids of every entry that may currently be undone (one per player with history),
/// in history order.
pub fn undoable_history_ids(state: &LedgerState) -> Vec<&str> {
    let mut seen = HashSet::new();
    state
        .history
        .iter()
        .filter(|h| seen.insert(h.player_id.as_str()))
        .map(|h| h.id.as_str())
        .collect()
}

/// A player's entries, newest first.
pub fn player_history<'a>(
    state: &'a LedgerState,
    player_id: &'a str,
) -> impl Iterator<Item = &'a ScoreHistoryEntry> + 'a {
    state.history.iter().filter(move |h| h.player_id == player_id)
}
