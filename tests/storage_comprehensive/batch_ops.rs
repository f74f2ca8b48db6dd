//! Batch Operations Tests
//!
//! - get_multi
//! - get_multi_with_cas

use std::collections::BTreeMap;

use crate::*;

#[test]
fn test_get_multi_returns_present_subset() {
    let store = create_store();
    store.set("k1", Value::Int(1)).unwrap();
    store.set("k3", Value::Int(3)).unwrap();

    let values = store.get_multi(&["k1", "k2", "k3"]).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("k1".to_string(), Value::Int(1));
    expected.insert("k3".to_string(), Value::Int(3));
    assert_eq!(values, expected);
}

#[test]
fn test_get_multi_empty_list() {
    let store = create_store();
    assert!(store.get_multi(&[]).unwrap().is_empty());
}

#[test]
fn test_get_multi_all_missing() {
    let store = create_store();
    assert!(store.get_multi(&["a", "b"]).unwrap().is_empty());
}

#[test]
fn test_get_multi_skips_expired() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("short", Value::Int(1), 1).unwrap();
    store.set("long", Value::Int(2)).unwrap();
    clock.advance(2);

    let values = store.get_multi(&["short", "long"]).unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values["long"], Value::Int(2));
}

#[test]
fn test_get_multi_with_cas_token_per_returned_key() {
    let store = create_store();
    store.set("k1", Value::Int(1)).unwrap();
    store.set("k2", Value::Int(2)).unwrap();

    let mut tokens = BTreeMap::new();
    let values = store.get_multi_with_cas(&["k1", "k2", "k3"], &mut tokens).unwrap();

    assert_eq!(values.len(), 2);
    assert_eq!(
        tokens.keys().collect::<Vec<_>>(),
        vec![&"k1".to_string(), &"k2".to_string()]
    );
}

#[test]
fn test_get_multi_tokens_each_valid_for_cas() {
    let store = create_store();
    store.set("k1", Value::Int(1)).unwrap();
    store.set("k2", Value::Int(2)).unwrap();

    let mut tokens = BTreeMap::new();
    store.get_multi_with_cas(&["k1", "k2"], &mut tokens).unwrap();

    assert!(store.cas(&tokens["k1"], "k1", Value::Int(10)).unwrap());
    assert!(store.cas(&tokens["k2"], "k2", Value::Int(20)).unwrap());
    assert_eq!(store.get("k1").unwrap(), Some(Value::Int(10)));
    assert_eq!(store.get("k2").unwrap(), Some(Value::Int(20)));
}

#[test]
fn test_get_multi_with_cas_replaces_incoming_tokens() {
    let store = create_store();
    store.set("k1", Value::Int(1)).unwrap();

    let mut tokens = BTreeMap::new();
    tokens.insert("other".to_string(), CasToken::new("stale"));
    store.get_multi_with_cas(&["k1"], &mut tokens).unwrap();

    assert_eq!(tokens.len(), 1);
    assert!(tokens.contains_key("k1"));
}
