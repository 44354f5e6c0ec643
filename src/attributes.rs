//! Attribute maps and the content hash that identifies an edge.

use crate::constants::{CHEBI_PREFIX, SYNTHETIC_ID_PREFIX};
use itertools::{join, Itertools};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Attribute map for nodes and edges. Keys are ordered, which makes hashing
/// independent of insertion order.
pub type AttrMap = BTreeMap<String, Value>;

/// Builds an attribute map from a fixed template.
pub fn attrs<const N: usize>(pairs: [(&str, Value); N]) -> AttrMap {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Content hash over the set of `(name, value)` items of `attrs`.
///
/// Two maps holding the same items hash equal regardless of how they were built.
pub fn edge_hash(attrs: &AttrMap) -> u64 {
    let mut hasher = Sha256::new();
    for (k, v) in attrs.iter() {
        hasher.update(k.as_bytes());
        hasher.update(b"\x1f");
        feed_canonical(&mut hasher, v);
        hasher.update(b"\x1e");
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

fn feed_canonical(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::Object(map) => {
            hasher.update(b"{");
            for (k, v) in map.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
                hasher.update(k.as_bytes());
                hasher.update(b":");
                feed_canonical(hasher, v);
                hasher.update(b",");
            }
            hasher.update(b"}");
        }
        Value::Array(items) => {
            hasher.update(b"[");
            for v in items.iter() {
                feed_canonical(hasher, v);
                hasher.update(b",");
            }
            hasher.update(b"]");
        }
        other => hasher.update(other.to_string().as_bytes()),
    }
}

/// Deterministic internal identifier for entities that have no external one.
pub fn synthetic_id(label: &str) -> String {
    let digest = Sha256::digest(label.as_bytes());
    let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}:{}", SYNTHETIC_ID_PREFIX, hex)
}

/// Textual form of a value: strings verbatim, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Null, or a string holding only whitespace.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Lists become comma separated strings, other values pass through.
pub fn flatten_list(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::String(join(items.iter().map(value_text), ",")),
        other => other,
    }
}

/// Sets `key` only when `value` is present.
pub fn set_present<V: Into<Value>>(map: &mut AttrMap, key: &str, value: Option<V>) {
    if let Some(v) = value {
        let v = v.into();
        if !v.is_null() {
            map.insert(key.to_string(), v);
        }
    }
}

pub fn is_chebi(id: &str) -> bool {
    id.starts_with(CHEBI_PREFIX)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_ignores_insertion_order() {
        let mut a = AttrMap::new();
        a.insert("datasource".into(), json!("Bgee"));
        a.insert("expression_level".into(), json!(93.1));
        let mut b = AttrMap::new();
        b.insert("expression_level".into(), json!(93.1));
        b.insert("datasource".into(), json!("Bgee"));
        assert_eq!(edge_hash(&a), edge_hash(&b));
    }

    #[test]
    fn hash_distinguishes_values_and_types() {
        let a = attrs([("score", json!(1))]);
        let b = attrs([("score", json!("1"))]);
        let c = attrs([("score", json!(2))]);
        assert_ne!(edge_hash(&a), edge_hash(&b));
        assert_ne!(edge_hash(&a), edge_hash(&c));
    }

    #[test]
    fn hash_of_nested_objects_is_key_order_independent() {
        let a = attrs([("x", json!({"a": 1, "b": 2}))]);
        let b = attrs([("x", json!({"b": 2, "a": 1}))]);
        assert_eq!(edge_hash(&a), edge_hash(&b));
    }

    #[test]
    fn synthetic_id_is_stable() {
        let id = synthetic_id("headache");
        assert_eq!(id, synthetic_id("headache"));
        assert!(id.starts_with("BDF:"));
        assert_eq!(id.len(), "BDF:".len() + 16);
        assert_ne!(id, synthetic_id("nausea"));
    }

    #[test]
    fn flatten_list_joins_with_commas() {
        assert_eq!(flatten_list(json!(["a", 1, "b"])), json!("a,1,b"));
        assert_eq!(flatten_list(json!("a")), json!("a"));
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!("  ")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!("x")));
    }
}
