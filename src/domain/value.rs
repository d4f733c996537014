//! Tolerant accessors over untyped feed records.
//!
//! Every accessor treats a missing key, a value of the wrong type, and a
//! blank string the same way: as absent. None of them can fail.

use serde_json::{Map, Value};

/// Non-blank string content of a value.
#[must_use]
pub fn text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Walk nested objects along `keys`.
///
/// Aborts with `None` as soon as a key is missing or an intermediate value
/// is not an object.
#[must_use]
pub fn path<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(record, |current, key| current.as_object()?.get(*key))
}

/// Non-blank string at a nested path.
#[must_use]
pub fn text_at<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    text(path(record, keys))
}

/// Object elements of the array stored under `key`.
///
/// A non-array value yields nothing and non-object elements are skipped.
pub fn entries<'a>(record: &'a Value, key: &str) -> impl Iterator<Item = &'a Map<String, Value>> {
    record
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_rejects_blank_and_non_strings() {
        assert_eq!(text(Some(&json!("abc"))), Some("abc"));
        assert_eq!(text(Some(&json!(""))), None);
        assert_eq!(text(Some(&json!("   "))), None);
        assert_eq!(text(Some(&json!(42))), None);
        assert_eq!(text(Some(&json!(null))), None);
        assert_eq!(text(None), None);
    }

    #[test]
    fn path_walks_nested_objects() {
        let record = json!({"pairInfo": {"baseToken": {"name": "Pepe"}}});
        assert_eq!(
            text_at(&record, &["pairInfo", "baseToken", "name"]),
            Some("Pepe")
        );
    }

    #[test]
    fn path_aborts_on_missing_or_non_object() {
        let record = json!({"pairInfo": {"baseToken": "flat"}, "list": [1, 2]});
        assert!(path(&record, &["pairInfo", "baseToken", "name"]).is_none());
        assert!(path(&record, &["pairInfo", "quoteToken", "name"]).is_none());
        assert!(path(&record, &["list", "0"]).is_none());
        assert!(path(&json!("scalar"), &["name"]).is_none());
    }

    #[test]
    fn entries_tolerates_wrong_shapes() {
        let record = json!({
            "links": [{"url": "a"}, "junk", 7, {"url": "b"}],
            "notList": {"url": "c"},
        });
        assert_eq!(entries(&record, "links").count(), 2);
        assert_eq!(entries(&record, "notList").count(), 0);
        assert_eq!(entries(&record, "missing").count(), 0);
    }
}
