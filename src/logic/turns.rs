//! History grouped by turn (sequence number) for display.

use crate::models::{LedgerState, ScoreHistoryEntry};
use serde::Serialize;
use std::collections::BTreeMap;

/// All entries sharing one sequence number, newest first.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn<'a> {
    pub sequence_number: u32,
    pub entries: Vec<&'a ScoreHistoryEntry>,
}

/// Group history by sequence number, latest turn first. Legacy entries without a
/// sequence number end up in turn 0 at the bottom.
pub fn history_by_turn(state: &LedgerState) -> Vec<Turn<'_>> {
    let mut grouped: BTreeMap<u32, Vec<&ScoreHistoryEntry>> = BTreeMap::new();
    for h in &state.history {
        grouped.entry(h.sequence_number).or_default().push(h);
    }
    grouped
        .into_iter()
        .rev()
        .map(|(sequence_number, entries)| Turn {
            sequence_number,
            entries,
        })
        .collect()
}
