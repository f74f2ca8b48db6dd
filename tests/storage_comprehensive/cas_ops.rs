//! Check-And-Set Tests
//!
//! - get_with_cas / cas round trip
//! - stale and foreign tokens
//! - set_with_cas

use crate::*;

fn read_token(store: &MemoryStore, key: &str) -> Option<CasToken> {
    let mut token = None;
    store.get_with_cas(key, &mut token).unwrap();
    token
}

#[test]
fn test_cas_round_trip() {
    let store = create_store();
    store.set("key", s("v1")).unwrap();

    let token = read_token(&store, "key").expect("token for present key");
    assert!(store.cas(&token, "key", s("v2")).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(s("v2")));
}

#[test]
fn test_stale_token_fails() {
    let store = create_store();
    store.set("key", s("v1")).unwrap();
    let token = read_token(&store, "key").unwrap();

    assert!(store.cas(&token, "key", s("v2")).unwrap());
    assert!(!store.cas(&token, "key", s("v3")).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(s("v2")));
}

#[test]
fn test_intervening_write_invalidates_token() {
    let store = create_store();
    store.set("key", s("v1")).unwrap();
    let token = read_token(&store, "key").unwrap();

    store.set("key", s("other")).unwrap();
    assert!(!store.cas(&token, "key", s("v2")).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(s("other")));
}

#[test]
fn test_cas_on_absent_key_fails_without_error() {
    let store = create_store();
    assert!(!store.cas(&CasToken::new("anything"), "missing", s("v")).unwrap());
    assert!(!store.has("missing").unwrap());
}

#[test]
fn test_token_from_another_key_fails() {
    let store = create_store();
    store.set("a", s("same")).unwrap();
    store.set("b", s("same")).unwrap();
    let token_a = read_token(&store, "a").unwrap();
    read_token(&store, "b");

    assert!(!store.cas(&token_a, "b", s("changed")).unwrap());
}

#[test]
fn test_get_with_cas_on_absent_key_yields_no_token() {
    let store = create_store();
    let mut token = Some(CasToken::new("left over"));
    assert_eq!(store.get_with_cas("missing", &mut token).unwrap(), None);
    assert_eq!(token, None);
}

#[test]
fn test_repeated_reads_issue_equal_tokens() {
    let store = create_store();
    store.set("key", Value::Int(1)).unwrap();
    let first = read_token(&store, "key").unwrap();
    let second = read_token(&store, "key").unwrap();
    assert_eq!(first, second);
    assert!(store.cas(&first, "key", Value::Int(2)).unwrap());
}

#[test]
fn test_cas_with_expiry() {
    let (store, clock) = create_clocked_store();
    store.set("key", Value::Int(1)).unwrap();
    let token = read_token(&store, "key").unwrap();

    assert!(store.cas_with_expiry(&token, "key", Value::Int(2), 5).unwrap());
    clock.advance(6);
    assert!(!store.has("key").unwrap());
}

#[test]
fn test_cas_on_expired_key_fails() {
    let (store, clock) = create_clocked_store();
    store.set_with_expiry("key", Value::Int(1), 5).unwrap();
    let token = read_token(&store, "key").unwrap();
    clock.advance(6);

    assert!(!store.cas(&token, "key", Value::Int(2)).unwrap());
    assert!(!store.has("key").unwrap());
}

#[test]
fn test_set_with_cas_token_is_conditional() {
    let store = create_store();
    store.set("key", Value::Int(1)).unwrap();

    assert!(!store
        .set_with_cas("key", Value::Int(2), 0, Some(&CasToken::new("wrong")))
        .unwrap());
    assert_eq!(store.get("key").unwrap(), Some(Value::Int(1)));

    let token = read_token(&store, "key").unwrap();
    assert!(store.set_with_cas("key", Value::Int(2), 0, Some(&token)).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(Value::Int(2)));
}

#[test]
fn test_set_with_no_token_is_plain_write() {
    let store = create_store();
    assert!(store.set_with_cas("key", Value::Int(1), 0, None).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(Value::Int(1)));
}
