//! ScoreLedger: the scoreboard state paired with the store it persists to.
//!
//! Construct one per scoreboard and pass it explicitly to whatever drives the UI. Every
//! successful mutation writes the full snapshot back to the store; store failures are
//! logged and never undo or block the in-memory change.

use crate::logic::{self, Turn};
use crate::models::{LedgerError, LedgerState, Player, RegisteredPlayer, ScoreHistoryEntry};
use crate::storage::{load_state, save_state, KeyValueStore};

pub struct ScoreLedger<S: KeyValueStore> {
    state: LedgerState,
    store: S,
}

impl<S: KeyValueStore> ScoreLedger<S> {
    /// Load the previous snapshot from `store` (or defaults) and take ownership of it.
    pub fn open(store: S) -> Self {
        let state = load_state(&store);
        Self { state, store }
    }

    /// Read-only view of the whole snapshot.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    /// Newest first.
    pub fn history(&self) -> &[ScoreHistoryEntry] {
        &self.state.history
    }

    pub fn registered_players(&self) -> &[RegisteredPlayer] {
        &self.state.registered_players
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn can_add_player(&self) -> bool {
        self.state.can_add_player()
    }

    pub fn can_remove_player(&self) -> bool {
        self.state.can_remove_player()
    }

    pub fn is_undoable(&self, history_id: &str) -> bool {
        logic::is_undoable(&self.state, history_id)
    }

    pub fn undoable_history_ids(&self) -> Vec<&str> {
        logic::undoable_history_ids(&self.state)
    }

    pub fn history_by_turn(&self) -> Vec<Turn<'_>> {
        logic::history_by_turn(&self.state)
    }

    pub fn add_player(&mut self) -> Result<Player, LedgerError> {
        let player = self.state.add_player().map_err(rejected("add player"))?.clone();
        log::debug!("Seated {} ({})", player.name, player.id);
        self.persist();
        Ok(player)
    }

    pub fn remove_last_player(&mut self) -> Result<Player, LedgerError> {
        let history_before = self.state.history.len();
        let player = self
            .state
            .remove_last_player()
            .map_err(rejected("remove last player"))?;
        log::debug!(
            "Removed {} ({}) and {} history entries",
            player.name,
            player.id,
            history_before - self.state.history.len()
        );
        self.persist();
        Ok(player)
    }

    pub fn update_player_name(&mut self, id: &str, name: &str) -> Result<(), LedgerError> {
        self.state
            .update_player_name(id, name)
            .map_err(rejected("rename player"))?;
        log::debug!("Renamed player {} to {}", id, name.trim());
        self.persist();
        Ok(())
    }

    pub fn add_score(
        &mut self,
        player_id: &str,
        delta: i32,
    ) -> Result<ScoreHistoryEntry, LedgerError> {
        let entry = logic::add_score(&mut self.state, player_id, delta)
            .map_err(rejected("add score"))?
            .clone();
        log::debug!(
            "{} {:+} -> {} (#{})",
            entry.player_name,
            entry.score,
            entry.total_score,
            entry.sequence_number
        );
        self.persist();
        Ok(entry)
    }

    pub fn undo_history(&mut self, history_id: &str) -> Result<ScoreHistoryEntry, LedgerError> {
        let entry = logic::undo_history(&mut self.state, history_id).map_err(rejected("undo"))?;
        log::debug!(
            "Undid {} {:+}; back to {}",
            entry.player_name,
            entry.score,
            entry.previous_score()
        );
        self.persist();
        Ok(entry)
    }

    /// Default roster, empty history. Registered names survive.
    pub fn reset_all(&mut self) {
        self.state.reset_all();
        log::info!("Scoreboard reset");
        self.persist();
    }

    pub fn add_registered_player(&mut self, name: &str) -> Result<RegisteredPlayer, LedgerError> {
        let rp = logic::add_registered_player(&mut self.state, name)
            .map_err(rejected("register name"))?
            .clone();
        log::debug!("Registered name {} ({})", rp.name, rp.id);
        self.persist();
        Ok(rp)
    }

    pub fn update_registered_player(&mut self, id: &str, name: &str) -> Result<(), LedgerError> {
        logic::update_registered_player(&mut self.state, id, name)
            .map_err(rejected("update registered name"))?;
        self.persist();
        Ok(())
    }

    pub fn delete_registered_player(&mut self, id: &str) -> Result<RegisteredPlayer, LedgerError> {
        let rp = logic::delete_registered_player(&mut self.state, id)
            .map_err(rejected("delete registered name"))?;
        log::debug!("Deleted registered name {}", rp.name);
        self.persist();
        Ok(rp)
    }

    /// Boundary check for a new or edited registered name; see [`logic::check_registered_name`].
    pub fn check_registered_name(
        &self,
        name: &str,
        exclude_id: Option<&str>,
    ) -> Result<String, LedgerError> {
        logic::check_registered_name(&self.state, name, exclude_id)
    }

    pub fn unseated_registered_names(&self) -> Vec<&str> {
        logic::unseated_registered_names(&self.state)
    }

    fn persist(&mut self) {
        if let Err(e) = save_state(&mut self.store, &self.state) {
            log::warn!("Failed to persist scoreboard: {}", e);
        }
    }
}

/// Log a rejected operation at debug level and pass the error through.
fn rejected(operation: &'static str) -> impl Fn(LedgerError) -> LedgerError {
    move |e| {
        log::debug!("{} rejected: {:?}", operation, e);
        e
    }
}
