//! CAS token derivation.
//!
//! A token is the lowercase hex SHA-256 of a canonical encoding of the key
//! and the value. The encoding is length-prefixed and type-tagged, and object
//! members are written in key order, so equal contents always hash equally.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use castore_core::{CasToken, Value};

/// Derive the token for a key holding `value`
pub fn derive(key: &str, value: &Value) -> CasToken {
    let mut buf = Vec::with_capacity(64);
    encode_str(&mut buf, key);
    encode_value(&mut buf, value);

    let digest = Sha256::digest(&buf);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        // Writing to a String cannot fail
        let _ = write!(hex, "{:02x}", byte);
    }
    CasToken::new(hex)
}

fn encode_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as u64).to_le_bytes());
}

fn encode_str(buf: &mut Vec<u8>, s: &str) {
    encode_len(buf, s.len());
    buf.extend_from_slice(s.as_bytes());
}

fn encode_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.push(0),
        Value::Bool(b) => {
            buf.push(1);
            buf.push(u8::from(*b));
        }
        Value::Int(i) => {
            buf.push(2);
            buf.extend_from_slice(&i.to_le_bytes());
        }
        Value::Float(f) => {
            buf.push(3);
            buf.extend_from_slice(&f.to_bits().to_le_bytes());
        }
        Value::String(s) => {
            buf.push(4);
            encode_str(buf, s);
        }
        Value::Bytes(b) => {
            buf.push(5);
            encode_len(buf, b.len());
            buf.extend_from_slice(b);
        }
        Value::Array(items) => {
            buf.push(6);
            encode_len(buf, items.len());
            for item in items {
                encode_value(buf, item);
            }
        }
        Value::Object(map) => {
            buf.push(7);
            encode_len(buf, map.len());
            let mut members: Vec<_> = map.iter().collect();
            members.sort_by(|a, b| a.0.cmp(b.0));
            for (k, v) in members {
                encode_str(buf, k);
                encode_value(buf, v);
            }
        }
    }
}
