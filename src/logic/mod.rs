//! Scoreboard business logic: scoring and undo, registered names, history views.

mod roster;
mod scoring;
mod turns;

pub use roster::{
    add_registered_player, check_registered_name, delete_registered_player,
    unseated_registered_names, update_registered_player,
};
pub use scoring::{add_score, is_undoable, player_history, undo_history, undoable_history_ids};
pub use turns::{history_by_turn, Turn};
