//! Expiry Tests
//!
//! - relative and absolute expiry
//! - zero / negative never expire
//! - lazy eviction through every operation
//! - one wall-clock test

use std::thread;
use std::time::Duration;

use crate::*;

#[test]
fn test_relative_expiry() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("key", s("v"), 1).unwrap();
    assert!(store.has("key").unwrap());

    clock.advance(1);
    assert!(store.has("key").unwrap());

    clock.advance(1);
    assert!(!store.has("key").unwrap());
    assert_eq!(store.get("key").unwrap(), None);
}

#[test]
fn test_zero_and_negative_never_expire() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("zero", s("v"), 0).unwrap();
    store.set_with_expiry("negative", s("v"), -1).unwrap();
    store.set("plain", s("v")).unwrap();

    clock.advance(10 * 365 * 24 * 3600);
    assert!(store.has("zero").unwrap());
    assert!(store.has("negative").unwrap());
    assert!(store.has("plain").unwrap());
}

#[test]
fn test_thirty_days_is_still_relative() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("key", s("v"), 2_592_000).unwrap();
    clock.advance(2_592_000);
    assert!(store.has("key").unwrap());
    clock.advance(1);
    assert!(!store.has("key").unwrap());
}

#[test]
fn test_above_thirty_days_is_absolute() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("key", s("v"), T0 + 50).unwrap();
    clock.set(T0 + 50);
    assert!(store.has("key").unwrap());
    clock.set(T0 + 51);
    assert!(!store.has("key").unwrap());
}

#[test]
fn test_absolute_timestamp_in_past_is_immediately_expired() {
    let (store, _) = create_clocked_store();
    store.set_with_expiry("key", s("v"), 2_592_001).unwrap();
    assert!(!store.has("key").unwrap());
}

#[test]
fn test_add_with_expiry() {
    let (store, clock) = create_clocked_store();
    assert!(store.add_with_expiry("key", s("v"), 3).unwrap());
    assert!(!store.add("key", s("w")).unwrap());
    clock.advance(4);
    assert!(store.add("key", s("w")).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(s("w")));
}

#[test]
fn test_expired_key_is_absent_for_append_and_increment() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("text", s("old"), 1).unwrap();
    store.set_with_expiry("count", Value::Int(100), 1).unwrap();
    clock.advance(2);

    store.append("text", "new").unwrap();
    assert_eq!(store.get("text").unwrap(), Some(s("new")));
    assert_eq!(store.increment_with_initial("count", 1, 7).unwrap(), 7);
}

#[test]
fn test_write_without_expiry_makes_entry_permanent() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("text", s("a"), 5).unwrap();
    store.set_with_expiry("count", Value::Int(1), 5).unwrap();
    store.append("text", "b").unwrap();
    store.increment("count").unwrap();

    clock.advance(100);
    assert_eq!(store.get("text").unwrap(), Some(s("ab")));
    assert_eq!(store.get("count").unwrap(), Some(Value::Int(2)));
}

#[test]
fn test_purge_expired_through_backend() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("a", s("v"), 1).unwrap();
    store.set("b", s("v")).unwrap();
    clock.advance(2);

    assert_eq!(store.with_backend(|b| b.len()), 1);
    assert_eq!(store.with_backend(|b| b.purge_expired()), 1);
    assert!(store.has("b").unwrap());
}

#[test]
fn test_wall_clock_expiry() {
    let store = create_store();
    store.set_with_expiry("key", s("v"), 1).unwrap();
    assert!(store.has("key").unwrap());

    thread::sleep(Duration::from_millis(2100));
    assert!(!store.has("key").unwrap());
    assert_eq!(store.get("key").unwrap(), None);
}
