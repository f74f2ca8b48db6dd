//! Basic Operations Tests
//!
//! - set / get / has
//! - add
//! - delete

use crate::*;

#[test]
fn test_set_then_get_returns_value() {
    let store = create_store();
    assert!(store.set("key", s("value")).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(s("value")));
    assert!(store.has("key").unwrap());
}

#[test]
fn test_get_missing_returns_none() {
    let store = create_store();
    assert_eq!(store.get("missing").unwrap(), None);
    assert!(!store.has("missing").unwrap());
}

#[test]
fn test_set_overwrites() {
    let store = create_store();
    store.set("key", Value::Int(1)).unwrap();
    store.set("key", Value::Int(2)).unwrap();
    assert_eq!(store.get("key").unwrap(), Some(Value::Int(2)));
}

#[test]
fn test_all_value_types_round_trip() {
    let store = create_store();
    let values = vec![
        Value::Null,
        Value::Bool(true),
        Value::Int(-7),
        Value::Float(2.5),
        s("text"),
        Value::Bytes(vec![0, 1, 255]),
        Value::Array(vec![Value::Int(1), s("two")]),
        Value::from(serde_json::json!({"name": "Alice", "tags": ["a", "b"]})),
    ];
    for (i, value) in values.into_iter().enumerate() {
        let key = format!("key:{}", i);
        store.set(&key, value.clone()).unwrap();
        assert_eq!(store.get(&key).unwrap(), Some(value));
    }
}

#[test]
fn test_add_only_when_absent() {
    let store = create_store();
    assert!(store.add("key", s("first")).unwrap());
    assert!(!store.add("key", s("second")).unwrap());
    assert_eq!(store.get("key").unwrap(), Some(s("first")));
}

#[test]
fn test_delete_present_and_absent() {
    let store = create_store();
    assert!(!store.delete("key").unwrap());

    store.set("key", Value::Int(1)).unwrap();
    assert!(store.delete("key").unwrap());
    assert!(!store.has("key").unwrap());
    assert!(!store.delete("key").unwrap());
}

#[test]
fn test_add_after_delete() {
    let store = create_store();
    store.set("key", Value::Int(1)).unwrap();
    store.delete("key").unwrap();
    assert!(store.add("key", Value::Int(2)).unwrap());
}

#[test]
fn test_keys_are_case_sensitive_and_unicode() {
    let store = create_store();
    store.set("Key", Value::Int(1)).unwrap();
    store.set("ключ", Value::Int(2)).unwrap();
    assert!(!store.has("key").unwrap());
    assert_eq!(store.get("ключ").unwrap(), Some(Value::Int(2)));
}
