//! ScoreHistoryEntry: one recorded score adjustment.

use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a history entry.
pub type HistoryId = String;

/// A single score adjustment applied to one player.
///
/// `player_name` is a live copy of the owning player's current name: renaming the
/// player rewrites it on every surviving entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryEntry {
    pub id: HistoryId,
    pub player_id: PlayerId,
    pub player_name: String,
    /// Signed delta applied.
    pub score: i32,
    /// Player's score right after applying `score`.
    pub total_score: i32,
    /// Stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// 1-based ordinal among this player's entries at creation time. Older snapshots
    /// lack the field; those entries load as 0.
    #[serde(default)]
    pub sequence_number: u32,
}

impl ScoreHistoryEntry {
    /// Record `delta` for `player`, whose score has already been moved to `total_score`.
    pub fn new(player: &Player, delta: i32, sequence_number: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            score: delta,
            total_score: player.score,
            // Millisecond precision so a persisted entry compares equal after reload.
            timestamp: Utc::now().trunc_subsecs(3),
            sequence_number,
        }
    }

    /// Score the player had before this adjustment.
    pub fn previous_score(&self) -> i32 {
        self.total_score - self.score
    }
}
