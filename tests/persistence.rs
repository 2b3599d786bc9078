//! Integration tests for loading and saving the ledger snapshot.

use scoreboard_web::{
    KeyValueStore, LedgerState, MemoryStore, ScoreLedger, StorageError, DEFAULT_PLAYER_COUNT,
    MAX_SCORE,
};

/// Store whose writes always fail.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
    }
}

fn populated_ledger() -> ScoreLedger<MemoryStore> {
    let mut ledger = ScoreLedger::open(MemoryStore::new());
    ledger.add_player().unwrap();
    ledger.update_player_name("1", "Alice").unwrap();
    ledger.add_score("1", 15).unwrap();
    ledger.add_score("2", -3).unwrap();
    ledger.add_score("1", -5).unwrap();
    ledger.add_registered_player("Bob").unwrap();
    ledger
}

#[test]
fn snapshot_round_trips_through_store() {
    let ledger = populated_ledger();
    let before: LedgerState = ledger.state().clone();

    let reloaded = ScoreLedger::open(ledger.store().clone());

    assert_eq!(reloaded.players(), before.players.as_slice());
    assert_eq!(reloaded.history(), before.history.as_slice());
    assert_eq!(reloaded.registered_players(), before.registered_players.as_slice());
}

#[test]
fn each_collection_is_stored_under_its_own_key() {
    let ledger = populated_ledger();
    let store = ledger.store();
    let players = store.raw("players").unwrap();
    let history = store.raw("history").unwrap();
    let registered = store.raw("registeredPlayers").unwrap();
    assert!(players.contains("\"Alice\""));
    assert!(history.contains("\"sequenceNumber\":2"));
    assert!(history.contains("\"playerId\":\"1\""));
    assert!(registered.contains("\"Bob\""));
}

#[test]
fn empty_store_gives_default_state() {
    let ledger = ScoreLedger::open(MemoryStore::new());
    assert_eq!(ledger.state(), &LedgerState::default());
}

#[test]
fn malformed_collection_falls_back_to_default() {
    let store = MemoryStore::new()
        .with_entry("players", "{not json")
        .with_entry("registeredPlayers", r#"[{"id":"r1","name":"Bob"}]"#);
    let ledger = ScoreLedger::open(store);
    assert_eq!(ledger.players().len(), DEFAULT_PLAYER_COUNT);
    assert_eq!(ledger.registered_players()[0].name, "Bob");
}

#[test]
fn legacy_history_without_sequence_number_loads_as_zero() {
    let store = MemoryStore::new()
        .with_entry(
            "players",
            r#"[{"id":"1","name":"A","score":7},{"id":"2","name":"B","score":0}]"#,
        )
        .with_entry(
            "history",
            r#"[{"id":"h1","playerId":"1","playerName":"A","score":7,"totalScore":7,"timestamp":1700000000000}]"#,
        );
    let ledger = ScoreLedger::open(store);
    assert_eq!(ledger.history().len(), 1);
    assert_eq!(ledger.history()[0].sequence_number, 0);
    assert_eq!(ledger.history()[0].timestamp.timestamp_millis(), 1_700_000_000_000);
    assert_eq!(ledger.players()[0].score, 7);
}

#[test]
fn orphaned_history_is_dropped_on_load() {
    let store = MemoryStore::new()
        .with_entry(
            "players",
            r#"[{"id":"1","name":"A","score":0},{"id":"2","name":"B","score":0}]"#,
        )
        .with_entry(
            "history",
            r#"[{"id":"h1","playerId":"9","playerName":"Z","score":1,"totalScore":1,"timestamp":0,"sequenceNumber":1}]"#,
        );
    let ledger = ScoreLedger::open(store);
    assert!(ledger.history().is_empty());
}

#[test]
fn roster_outside_seat_limits_falls_back_to_default() {
    let store = MemoryStore::new().with_entry("players", r#"[{"id":"1","name":"A","score":0}]"#);
    let ledger = ScoreLedger::open(store);
    assert_eq!(ledger.players().len(), DEFAULT_PLAYER_COUNT);
}

#[test]
fn out_of_range_score_falls_back_to_default_roster() {
    let store = MemoryStore::new()
        .with_entry(
            "players",
            r#"[{"id":"1","name":"A","score":500000},{"id":"2","name":"B","score":0}]"#,
        )
        .with_entry(
            "history",
            r#"[{"id":"h1","playerId":"1","playerName":"A","score":500000,"totalScore":500000,"timestamp":0,"sequenceNumber":1}]"#,
        );
    let ledger = ScoreLedger::open(store);
    assert_eq!(ledger.players().len(), DEFAULT_PLAYER_COUNT);
    assert!(ledger.players().iter().all(|p| p.score <= MAX_SCORE));
    assert_eq!(ledger.players()[0].name, "Player1");
    assert!(ledger.history().is_empty());
}

#[test]
fn duplicate_player_ids_fall_back_to_default_roster() {
    let store = MemoryStore::new().with_entry(
        "players",
        r#"[{"id":"1","name":"A","score":0},{"id":"1","name":"B","score":0}]"#,
    );
    let ledger = ScoreLedger::open(store);
    let ids: Vec<&str> = ledger.players().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[test]
fn stale_history_names_follow_owner_on_load() {
    let store = MemoryStore::new()
        .with_entry(
            "players",
            r#"[{"id":"1","name":"Alice","score":3},{"id":"2","name":"B","score":0}]"#,
        )
        .with_entry(
            "history",
            r#"[{"id":"h1","playerId":"1","playerName":"Old","score":3,"totalScore":3,"timestamp":0,"sequenceNumber":1}]"#,
        );
    let ledger = ScoreLedger::open(store);
    assert_eq!(ledger.history()[0].player_name, "Alice");
}

#[test]
fn every_mutation_is_persisted() {
    let mut ledger = ScoreLedger::open(MemoryStore::new());
    assert!(ledger.store().raw("players").is_none());
    ledger.add_score("1", 4).unwrap();
    let reloaded = ScoreLedger::open(ledger.store().clone());
    assert_eq!(reloaded.players()[0].score, 4);

    ledger.reset_all();
    let reloaded = ScoreLedger::open(ledger.store().clone());
    assert!(reloaded.history().is_empty());
}

#[test]
fn rejected_operation_writes_nothing() {
    let mut ledger = ScoreLedger::open(MemoryStore::new());
    assert!(ledger.add_score("1", 0).is_err());
    assert!(ledger.store().raw("history").is_none());
}

#[test]
fn store_failures_do_not_block_mutations() {
    let mut ledger = ScoreLedger::open(BrokenStore);
    let entry = ledger.add_score("1", 12).unwrap();
    assert_eq!(entry.total_score, 12);
    assert_eq!(ledger.players()[0].score, 12);
    ledger.add_player().unwrap();
    assert_eq!(ledger.players().len(), DEFAULT_PLAYER_COUNT + 1);
}
