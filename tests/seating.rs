//! Integration tests for seat management: add, remove-last, rename, reset.

use scoreboard_web::{
    LedgerError, MemoryStore, ScoreLedger, DEFAULT_PLAYER_COUNT, MAX_PLAYERS, MIN_PLAYERS,
};

fn fresh_ledger() -> ScoreLedger<MemoryStore> {
    ScoreLedger::open(MemoryStore::new())
}

#[test]
fn starts_with_default_roster() {
    let ledger = fresh_ledger();
    let ids: Vec<&str> = ledger.players().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    let names: Vec<&str> = ledger.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Player1", "Player2", "Player3", "Player4"]);
    assert!(ledger.players().iter().all(|p| p.score == 0));
    assert!(ledger.history().is_empty());
    assert!(ledger.registered_players().is_empty());
}

#[test]
fn add_player_names_next_seat() {
    let mut ledger = fresh_ledger();
    let p = ledger.add_player().unwrap();
    assert_eq!(p.name, "Player5");
    assert_eq!(p.score, 0);
    assert_eq!(ledger.players().last().unwrap().id, p.id);
}

#[test]
fn add_player_rejected_at_capacity() {
    let mut ledger = fresh_ledger();
    while ledger.players().len() < MAX_PLAYERS {
        ledger.add_player().unwrap();
    }
    assert!(!ledger.can_add_player());
    let before = ledger.state().clone();

    let err = ledger.add_player().unwrap_err();
    assert_eq!(err, LedgerError::TooManyPlayers { max: MAX_PLAYERS });
    assert!(err.notice().is_some());
    assert_eq!(ledger.state(), &before);
}

#[test]
fn remove_last_player_cascades_history() {
    let mut ledger = fresh_ledger();
    let extra = ledger.add_player().unwrap();
    ledger.add_score(&extra.id, 5).unwrap();
    ledger.add_score("1", 2).unwrap();
    ledger.add_score(&extra.id, 5).unwrap();
    let history_before = ledger.history().len();

    let removed = ledger.remove_last_player().unwrap();

    assert_eq!(removed.id, extra.id);
    assert_eq!(ledger.players().len(), DEFAULT_PLAYER_COUNT);
    assert_eq!(ledger.history().len(), history_before - 2);
    assert!(ledger.history().iter().all(|h| h.player_id != extra.id));
    assert_eq!(ledger.players()[0].score, 2);
}

#[test]
fn remove_rejected_at_minimum() {
    let mut ledger = fresh_ledger();
    while ledger.players().len() > MIN_PLAYERS {
        ledger.remove_last_player().unwrap();
    }
    assert!(!ledger.can_remove_player());
    let err = ledger.remove_last_player().unwrap_err();
    assert_eq!(err, LedgerError::TooFewPlayers { min: MIN_PLAYERS });
    assert_eq!(ledger.players().len(), MIN_PLAYERS);
}

#[test]
fn rename_is_trimmed() {
    let mut ledger = fresh_ledger();
    ledger.update_player_name("2", "  Bob  ").unwrap();
    assert_eq!(ledger.players()[1].name, "Bob");
}

#[test]
fn rename_rejects_blank_and_duplicate_names() {
    let mut ledger = fresh_ledger();
    ledger.update_player_name("1", "Alice").unwrap();

    assert_eq!(ledger.update_player_name("2", "   "), Err(LedgerError::EmptyName));
    assert_eq!(
        ledger.update_player_name("2", " Alice "),
        Err(LedgerError::DuplicatePlayerName)
    );
    assert_eq!(ledger.players()[1].name, "Player2");

    // Keeping one's own name is not a duplicate.
    ledger.update_player_name("1", "Alice").unwrap();
}

#[test]
fn rename_unknown_player_is_silent() {
    let mut ledger = fresh_ledger();
    let before = ledger.state().clone();
    let err = ledger.update_player_name("99", "Zed").unwrap_err();
    assert!(err.is_silent());
    assert_eq!(ledger.state(), &before);
}

#[test]
fn reset_restores_defaults_but_keeps_registered_names() {
    let mut ledger = fresh_ledger();
    ledger.add_player().unwrap();
    ledger.update_player_name("1", "Alice").unwrap();
    ledger.add_score("1", 30).unwrap();
    ledger.add_registered_player("Carol").unwrap();

    ledger.reset_all();

    assert_eq!(ledger.players().len(), DEFAULT_PLAYER_COUNT);
    assert_eq!(ledger.players()[0].name, "Player1");
    assert!(ledger.players().iter().all(|p| p.score == 0));
    assert!(ledger.history().is_empty());
    assert_eq!(ledger.registered_players().len(), 1);
    assert_eq!(ledger.registered_players()[0].name, "Carol");
}
