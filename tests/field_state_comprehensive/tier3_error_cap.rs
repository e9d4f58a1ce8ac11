//! Tier 3: Error cap
//!
//! The store holds at most `max_errors` errors, the last of which is the
//! single "too many errors" sentinel at the root key.

use crate::test_utils::*;
use fieldstate::{
    FieldError, FieldStateStore, StoreOptions, ValidationState, DEFAULT_MAX_ERRORS,
    TOO_MANY_ERRORS_MESSAGE,
};

fn error_bearing_entries(store: &FieldStateStore) -> usize {
    store.values().filter(|e| !e.errors().is_empty()).count()
}

fn sentinels(store: &FieldStateStore) -> usize {
    store
        .values()
        .flat_map(|e| e.errors())
        .filter(|e| e.fault().is_some_and(|f| f.is_too_many_errors()))
        .count()
}

#[test]
fn test_cap_with_default_options() {
    init_tracing();
    let mut store = FieldStateStore::new();

    let results: Vec<bool> = (0..DEFAULT_MAX_ERRORS + 50)
        .map(|i| store.add_error(&format!("rows[{i}].value"), "bad").unwrap())
        .collect();

    assert!(results[..DEFAULT_MAX_ERRORS - 1].iter().all(|added| *added));
    assert!(results[DEFAULT_MAX_ERRORS - 1..].iter().all(|added| !*added));
    assert_eq!(error_bearing_entries(&store), DEFAULT_MAX_ERRORS);
    assert_eq!(sentinels(&store), 1);
    assert_eq!(store.error_count(), DEFAULT_MAX_ERRORS);
    assert!(store.max_errors_reached());
    assert!(store.has_reached_max_errors());
}

#[test]
fn test_sentinel_lives_at_root() {
    let mut store = FieldStateStore::with_options(StoreOptions::new().max_errors(2));
    assert!(store.add_error("a", "one").unwrap());
    assert!(!store.add_error("b", "two").unwrap());

    let root = store.lookup("").unwrap();
    assert_eq!(root.key(), "");
    assert_eq!(root.validation_state(), ValidationState::Invalid);
    match &root.errors()[0] {
        FieldError::Fault(fault) => assert_eq!(fault.message, TOO_MANY_ERRORS_MESSAGE),
        other => panic!("expected sentinel fault, got {other:?}"),
    }
    assert_eq!(keys_under(&store, ""), vec!["", "a"]);
    assert!(!store.is_valid());
}

#[test]
fn test_errors_on_one_key_count_individually() {
    let mut store = FieldStateStore::with_options(StoreOptions::new().max_errors(4));
    assert!(store.add_error("pw", "too short").unwrap());
    assert!(store.add_error("pw", "needs a digit").unwrap());
    assert!(store.add_error("pw", "needs a symbol").unwrap());
    assert!(!store.add_error("pw", "one too many").unwrap());

    assert_eq!(store.lookup("pw").unwrap().errors().len(), 3);
    assert_eq!(store.error_count(), 4);
}

#[test]
fn test_removing_errors_reopens_capacity() {
    let mut store = FieldStateStore::with_options(StoreOptions::new().max_errors(3));
    store.add_error("a", "x").unwrap();
    store.add_error("b", "y").unwrap();
    assert!(!store.add_error("c", "z").unwrap());
    assert_eq!(store.error_count(), 3);

    assert!(store.remove("a"));
    assert!(store.remove("b"));
    assert_eq!(store.error_count(), 1);

    // The sentinel stays recorded; new errors fit again.
    assert!(store.add_error("c", "z").unwrap());
    assert_eq!(sentinels(&store), 1);
}

#[test]
fn test_copy_records_its_own_sentinel() {
    let mut source = FieldStateStore::with_options(StoreOptions::new().max_errors(2));
    source.add_error("a", "x").unwrap();
    source.add_error("b", "y").unwrap();

    let mut copy = FieldStateStore::from_store(&source).unwrap();
    assert!(!copy.max_errors_reached());
    assert!(!copy.add_error("c", "z").unwrap());
    assert!(copy.max_errors_reached());
    // The copied sentinel plus the copy's own.
    assert_eq!(copy.lookup("").unwrap().errors().len(), 2);
}
