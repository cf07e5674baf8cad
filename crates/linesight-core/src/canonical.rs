// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Serializes `value` as JSON with object keys sorted at every depth.
pub fn stable_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let raw = serde_json::to_value(value)?;
    serde_json::to_vec(&normalize(raw))
}

pub fn stable_json_hash_hex<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = stable_json_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> =
                map.into_iter().map(|(k, v)| (k, normalize(v))).collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::{sha256_hex, stable_json_bytes, stable_json_hash_hex};
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted_recursively() {
        let value = json!({
            "station": "ScrewCheck",
            "filter": {"to": "b", "from": "a"},
            "columns": [{"z": 1, "a": 2}],
        });
        let bytes = stable_json_bytes(&value).expect("stable json bytes");
        let text = String::from_utf8(bytes).expect("utf8 json");
        assert_eq!(
            text,
            r#"{"columns":[{"a":2,"z":1}],"filter":{"from":"a","to":"b"},"station":"ScrewCheck"}"#
        );
    }

    #[test]
    fn hash_ignores_key_insertion_order() {
        let a = stable_json_hash_hex(&json!({"line": "L1", "station": "LabelOCR"}))
            .expect("hash a");
        let b = stable_json_hash_hex(&json!({"station": "LabelOCR", "line": "L1"}))
            .expect("hash b");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn sha256_of_empty_input_is_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
