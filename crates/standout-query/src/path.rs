//! Dotted field-path resolution.

use serde_json::Value;

/// Resolves a dot-delimited path (`"a.b.c"`) against an item.
///
/// Each segment projects one level deeper into a JSON object. Resolution
/// yields `None` ("no value", distinct from a present `null`) as soon as the
/// current value is not an object or the field is absent. Arrays are not
/// traversed, so `"tags.0"` never reaches into a sequence.
pub fn resolve<'a>(item: Option<&'a Value>, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(item?, |current, segment| current.as_object()?.get(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_fields() {
        let doc = json!({"a": {"b": 5}});
        assert_eq!(resolve(Some(&doc), "a.b"), Some(&json!(5)));
        assert_eq!(resolve(Some(&doc), "a"), Some(&json!({"b": 5})));
    }

    #[test]
    fn stops_at_non_object() {
        let doc = json!({"a": 5});
        assert_eq!(resolve(Some(&doc), "a.b"), None);
        assert_eq!(resolve(Some(&json!("text")), "len"), None);
    }

    #[test]
    fn absent_field_is_no_value() {
        assert_eq!(resolve(Some(&json!({})), "a.b"), None);
        assert_eq!(resolve(Some(&json!({})), "a"), None);
        assert_eq!(resolve(None, "a"), None);
    }

    #[test]
    fn null_is_a_value() {
        let doc = json!({"a": null});
        assert_eq!(resolve(Some(&doc), "a"), Some(&Value::Null));
        assert_eq!(resolve(Some(&doc), "a.b"), None);
    }

    #[test]
    fn does_not_traverse_arrays() {
        let doc = json!({"tags": ["x", "y"], "rows": [{"id": 1}]});
        assert_eq!(resolve(Some(&doc), "tags.0"), None);
        assert_eq!(resolve(Some(&doc), "rows.id"), None);
    }

    #[test]
    fn empty_segments_are_field_names() {
        let doc = json!({"": {"x": 1}});
        assert_eq!(resolve(Some(&doc), ".x"), Some(&json!(1)));
    }
}
