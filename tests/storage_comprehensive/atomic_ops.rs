//! Append and Increment Tests

use crate::*;

// =============================================================================
// append
// =============================================================================

#[test]
fn test_append_on_fresh_key() {
    let store = create_store();
    assert!(store.append("key", "a").unwrap());
    assert!(store.append("key", "b").unwrap());
    assert_eq!(store.get("key").unwrap(), Some(s("ab")));
}

#[test]
fn test_append_to_existing_string() {
    let store = create_store();
    store.set("key", s("hello")).unwrap();
    store.append("key", ", world").unwrap();
    assert_eq!(store.get("key").unwrap(), Some(s("hello, world")));
}

#[test]
fn test_append_empty_string() {
    let store = create_store();
    store.append("key", "").unwrap();
    assert_eq!(store.get("key").unwrap(), Some(s("")));
}

#[test]
fn test_append_to_integer_is_type_mismatch() {
    let store = create_store();
    store.set("key", Value::Int(5)).unwrap();

    let err = store.append("key", "x").unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(store.get("key").unwrap(), Some(Value::Int(5)));
}

#[test]
fn test_append_with_expiry() {
    let (store, clock) = create_clocked_store();
    store.append_with_expiry("key", "a", 2).unwrap();
    clock.advance(3);
    assert!(!store.has("key").unwrap());
}

// =============================================================================
// increment
// =============================================================================

#[test]
fn test_increment_sequence_with_initial() {
    let store = create_store();
    let seen: Vec<i64> = (0..5)
        .map(|_| store.increment_with_initial("counter", 2, 1).unwrap())
        .collect();
    assert_eq!(seen, vec![1, 3, 5, 7, 9]);
}

#[test]
fn test_increment_defaults() {
    let store = create_store();
    assert_eq!(store.increment("counter").unwrap(), 0);
    assert_eq!(store.increment("counter").unwrap(), 1);
    assert_eq!(store.increment_by("counter", 10).unwrap(), 11);
}

#[test]
fn test_increment_existing_integer() {
    let store = create_store();
    store.set("counter", Value::Int(40)).unwrap();
    assert_eq!(store.increment_by("counter", 2).unwrap(), 42);
    assert_eq!(store.get("counter").unwrap(), Some(Value::Int(42)));
}

#[test]
fn test_decrement_with_negative_offset() {
    let store = create_store();
    store.set("counter", Value::Int(0)).unwrap();
    assert_eq!(store.increment_by("counter", -5).unwrap(), -5);
}

#[test]
fn test_increment_string_is_type_mismatch() {
    let store = create_store();
    store.set("counter", s("1")).unwrap();

    let err = store.increment("counter").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert_eq!(store.get("counter").unwrap(), Some(s("1")));
}

#[test]
fn test_increment_float_is_type_mismatch() {
    let store = create_store();
    store.set("counter", Value::Float(1.0)).unwrap();
    assert!(store.increment("counter").unwrap_err().is_type_mismatch());
}

#[test]
fn test_increment_overflow() {
    let store = create_store();
    store.set("counter", Value::Int(i64::MAX)).unwrap();
    let err = store.increment("counter").unwrap_err();
    assert!(matches!(err, Error::Overflow { .. }));
}

#[test]
fn test_increment_with_expiry() {
    let (store, clock) = create_clocked_store();
    assert_eq!(store.increment_with_expiry("counter", 1, 10, 5).unwrap(), 10);
    clock.advance(6);
    assert_eq!(store.increment_with_expiry("counter", 1, 20, 5).unwrap(), 20);
}

#[test]
fn test_increment_invalidates_token() {
    let store = create_store();
    store.set("counter", Value::Int(1)).unwrap();
    let mut token = None;
    store.get_with_cas("counter", &mut token).unwrap();
    store.increment("counter").unwrap();

    assert!(!store.cas(&token.unwrap(), "counter", Value::Int(0)).unwrap());
}
