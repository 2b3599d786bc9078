//! CSV export of the score history.

use crate::models::ScoreHistoryEntry;
use serde::Serialize;

const HEADER: [&str; 6] = [
    "sequence_number",
    "player_name",
    "previous_score",
    "delta",
    "total_score",
    "timestamp",
];

#[derive(Serialize)]
struct HistoryRow<'a> {
    sequence_number: u32,
    player_name: &'a str,
    previous_score: i32,
    delta: i32,
    total_score: i32,
    timestamp: String,
}

/// Render `history` (stored newest-first) as CSV, oldest entry first. The header row is
/// always present, even with no entries.
pub fn history_csv(history: &[ScoreHistoryEntry]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for h in history.iter().rev() {
        wtr.serialize(HistoryRow {
            sequence_number: h.sequence_number,
            player_name: &h.player_name,
            previous_score: h.previous_score(),
            delta: h.score,
            total_score: h.total_score,
            timestamp: h.timestamp.to_rfc3339(),
        })?;
    }
    wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}
