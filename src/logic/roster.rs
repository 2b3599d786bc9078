//! Registered (reusable) player names.
//!
//! The CRUD functions only trim and reject blank names. Duplicate checks happen at the
//! edit boundary through [`check_registered_name`] before calling add/update.

use crate::models::{LedgerError, LedgerState, RegisteredPlayer};

/// Validate a name about to be added (or, with `exclude_id`, about to replace an existing
/// entry's name). Returns the trimmed name.
pub fn check_registered_name(
    state: &LedgerState,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<String, LedgerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    let is_duplicate = state
        .registered_players
        .iter()
        .any(|rp| Some(rp.id.as_str()) != exclude_id && rp.name == trimmed);
    if is_duplicate {
        return Err(LedgerError::DuplicateRegisteredName);
    }
    Ok(trimmed.to_string())
}

pub fn add_registered_player<'a>(
    state: &'a mut LedgerState,
    name: &str,
) -> Result<&'a RegisteredPlayer, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    state.registered_players.push(RegisteredPlayer::new(name));
    let idx = state.registered_players.len() - 1;
    Ok(&state.registered_players[idx])
}

pub fn update_registered_player(
    state: &mut LedgerState,
    id: &str,
    name: &str,
) -> Result<(), LedgerError> {
    let rp = state
        .registered_players
        .iter_mut()
        .find(|rp| rp.id == id)
        .ok_or_else(|| LedgerError::RegisteredPlayerNotFound(id.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    rp.name = name.to_string();
    Ok(())
}

/// Remove a registered name. Returns the removed entry.
pub fn delete_registered_player(
    state: &mut LedgerState,
    id: &str,
) -> Result<RegisteredPlayer, LedgerError> {
    let idx = state
        .registered_players
        .iter()
        .position(|rp| rp.id == id)
        .ok_or_else(|| LedgerError::RegisteredPlayerNotFound(id.to_string()))?;
    Ok(state.registered_players.remove(idx))
}

/// Registered names no active player is currently using (name suggestions for a seat).
pub fn unseated_registered_names(state: &LedgerState) -> Vec<&str> {
    state
        .registered_players
        .iter()
        .filter(|rp| !state.players.iter().any(|p| p.name == rp.name))
        .map(|rp| rp.name.as_str())
        .collect()
}
