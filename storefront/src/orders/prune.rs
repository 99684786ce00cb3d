//! Serialization-safety prune
//!
//! Generic recursive pass over a serialized record removing fields whose
//! value is absent: nulls, empty strings, and objects left empty after
//! pruning. One uniform rule instead of per-field conditionals, so no
//! null placeholder ever reaches the persisted shape.

use serde_json::Value;

/// Remove absent fields from `value` in place.
///
/// - object entries whose value is `null`, `""`, or an object that
///   becomes empty after pruning are dropped;
/// - array elements are pruned recursively but never removed, so list
///   shapes (line items, status history) stay intact.
pub fn prune_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                prune_value(v);
            }
            map.retain(|_, v| !is_absent(v));
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                prune_value(item);
            }
        }
        _ => {}
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_removes_nulls_and_empty_strings() {
        let mut v = json!({
            "name": "Ana",
            "email": null,
            "note": "",
            "phone": "+34600000000"
        });
        prune_value(&mut v);
        assert_eq!(v, json!({ "name": "Ana", "phone": "+34600000000" }));
    }

    #[test]
    fn test_removes_objects_emptied_by_pruning() {
        let mut v = json!({
            "customer": { "email": null, "fax": "" },
            "code": "ORD-1"
        });
        prune_value(&mut v);
        assert_eq!(v, json!({ "code": "ORD-1" }));
    }

    #[test]
    fn test_array_elements_survive() {
        let mut v = json!({
            "items": [
                { "name": "Paella", "note": null },
                { "name": "Gazpacho", "note": "cold" }
            ]
        });
        prune_value(&mut v);
        assert_eq!(
            v,
            json!({
                "items": [
                    { "name": "Paella" },
                    { "name": "Gazpacho", "note": "cold" }
                ]
            })
        );
    }

    #[test]
    fn test_keeps_zero_and_false() {
        // 0 and false are present values, not absent ones
        let mut v = json!({ "tax": 0.0, "is_active": false, "count": 0 });
        let expected = v.clone();
        prune_value(&mut v);
        assert_eq!(v, expected);
    }

    #[test]
    fn test_nested_arrays_of_objects() {
        let mut v = json!({
            "history": [ { "status": "PENDING_CONFIRMATION", "note": null, "at": 5 } ]
        });
        prune_value(&mut v);
        assert_eq!(
            v,
            json!({ "history": [ { "status": "PENDING_CONFIRMATION", "at": 5 } ] })
        );
    }
}
