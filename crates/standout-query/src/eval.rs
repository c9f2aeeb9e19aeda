//! Expression and criteria evaluation.
//!
//! [`matches`] walks a [`Criteria`] entry by entry, dispatching each key to
//! the operator table or to path resolution. [`evaluate`] decides whether a
//! single value satisfies a single [`Criterion`]. The two recurse into each
//! other for nested criteria and logical operators.

use serde_json::Value;

use crate::criterion::{Criteria, Criterion};
use crate::error::Disposition;
use crate::op::Operator;
use crate::ordering::strict_eq;
use crate::path::resolve;
use crate::value::Scalar;

/// Evaluates `criteria` against `item`.
///
/// Entries run in insertion order. The first entry whose disposition is not
/// `Ok(true)` is returned as-is, so later entries are never evaluated. Empty
/// criteria match everything.
pub fn matches(item: Option<&Value>, criteria: &Criteria) -> Disposition {
    for (key, criterion) in criteria.iter() {
        let disposition = match Operator::from_key(key) {
            Some(op) => op.apply(item, criterion),
            None => evaluate(resolve(item, key), criterion),
        };
        if disposition != Ok(true) {
            return disposition;
        }
    }
    Ok(true)
}

/// Evaluates a single criterion against a single value.
///
/// - A pattern matches string items it finds a match in; anything else is a
///   non-match, never an error.
/// - Nested criteria are evaluated with `item` as the current value.
/// - A list matches positionally: element `i` is evaluated against element
///   `i` of a sequence item, or against "no value" when there is none.
/// - A literal is compared by strict equality. A missing item equals nothing.
pub fn evaluate(item: Option<&Value>, criterion: &Criterion) -> Disposition {
    match criterion {
        Criterion::Pattern(regex) => Ok(item
            .and_then(Value::as_str)
            .is_some_and(|s| regex.is_match(s))),
        Criterion::Criteria(criteria) => matches(item, criteria),
        Criterion::List(expected) => {
            let actual = item.and_then(Value::as_array);
            for (index, element) in expected.iter().enumerate() {
                let found = actual.and_then(|items| items.get(index));
                let disposition = evaluate(found, element);
                if disposition != Ok(true) {
                    return disposition;
                }
            }
            Ok(true)
        }
        literal => Ok(match (item.and_then(Scalar::from_json), literal.as_scalar()) {
            (Some(actual), Some(expected)) => strict_eq(actual, expected),
            _ => false,
        }),
    }
}

/// Evaluates a membership candidate for `$in` and `$all`.
///
/// Like [`evaluate`], but when `item` is a sequence the candidate also
/// matches if any member of the sequence satisfies it.
pub fn evaluate_member(item: Option<&Value>, candidate: &Criterion) -> Disposition {
    if evaluate(item, candidate)? {
        return Ok(true);
    }
    if let Some(members) = item.and_then(Value::as_array) {
        for member in members {
            if evaluate(Some(member), candidate)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;
    use serde_json::json;

    fn criteria(value: Value) -> Criteria {
        Criteria::try_from(value).unwrap()
    }

    #[test]
    fn empty_criteria_match_everything() {
        assert_eq!(matches(Some(&json!({"a": 1})), &Criteria::new()), Ok(true));
        assert_eq!(matches(Some(&json!(null)), &Criteria::new()), Ok(true));
        assert_eq!(matches(None, &Criteria::new()), Ok(true));
    }

    #[test]
    fn literal_strict_equality() {
        let doc = json!({"n": 1, "s": "1", "b": true, "z": null});
        assert_eq!(matches(Some(&doc), &criteria(json!({"n": 1}))), Ok(true));
        assert_eq!(matches(Some(&doc), &criteria(json!({"n": 1.0}))), Ok(true));
        assert_eq!(matches(Some(&doc), &criteria(json!({"n": "1"}))), Ok(false));
        assert_eq!(matches(Some(&doc), &criteria(json!({"s": 1}))), Ok(false));
        assert_eq!(matches(Some(&doc), &criteria(json!({"b": true}))), Ok(true));
        assert_eq!(matches(Some(&doc), &criteria(json!({"z": null}))), Ok(true));
    }

    #[test]
    fn missing_field_equals_nothing() {
        let doc = json!({});
        assert_eq!(
            matches(Some(&doc), &criteria(json!({"a": null}))),
            Ok(false)
        );
        assert_eq!(matches(Some(&doc), &criteria(json!({"a": 0}))), Ok(false));
    }

    #[test]
    fn literal_never_equals_structured_item() {
        let doc = json!({"a": {"b": 1}, "t": [1]});
        assert_eq!(evaluate(doc.get("a"), &Criterion::from(1)), Ok(false));
        assert_eq!(evaluate(doc.get("t"), &Criterion::from(1)), Ok(false));
    }

    #[test]
    fn nested_paths_and_criteria() {
        let doc = json!({"a": {"b": {"c": 5}}});
        assert_eq!(
            matches(Some(&doc), &criteria(json!({"a.b.c": 5}))),
            Ok(true)
        );
        assert_eq!(
            matches(Some(&doc), &criteria(json!({"a": {"b.c": 5}}))),
            Ok(true)
        );
        assert_eq!(
            matches(Some(&doc), &criteria(json!({"a": {"b": {"c": {"$gt": 4}}}}))),
            Ok(true)
        );
        assert_eq!(
            matches(Some(&doc), &criteria(json!({"a.b.c.d": 5}))),
            Ok(false)
        );
    }

    #[test]
    fn pattern_matches_strings_only() {
        let pattern = Criterion::pattern("^ab+c$").unwrap();
        assert_eq!(evaluate(Some(&json!("abbc")), &pattern), Ok(true));
        assert_eq!(evaluate(Some(&json!("ac")), &pattern), Ok(false));
        assert_eq!(evaluate(Some(&json!(123)), &pattern), Ok(false));
        assert_eq!(evaluate(Some(&json!(["abc"])), &pattern), Ok(false));
        assert_eq!(evaluate(None, &pattern), Ok(false));
    }

    #[test]
    fn list_matches_positionally() {
        let item = json!(["x", "y", "z"]);
        let prefix = Criterion::from(vec!["x", "y"]);
        assert_eq!(evaluate(Some(&item), &prefix), Ok(true));

        let swapped = Criterion::from(vec!["y", "x"]);
        assert_eq!(evaluate(Some(&item), &swapped), Ok(false));

        let too_long = Criterion::from(vec!["x", "y", "z", "w"]);
        assert_eq!(evaluate(Some(&item), &too_long), Ok(false));

        assert_eq!(evaluate(Some(&json!("x")), &prefix), Ok(false));
        assert_eq!(
            evaluate(Some(&json!(5)), &Criterion::List(vec![])),
            Ok(true)
        );
    }

    #[test]
    fn operator_keys_apply_to_current_item() {
        assert_eq!(
            matches(Some(&json!(5)), &criteria(json!({"$gt": 3, "$lt": 9}))),
            Ok(true)
        );
        assert_eq!(
            matches(Some(&json!(5)), &criteria(json!({"$gt": 3, "$lt": 4}))),
            Ok(false)
        );
    }

    #[test]
    fn operator_names_shadow_fields() {
        let doc = json!({"$gt": 1});
        // `$gt` is applied to the whole record, which is not comparable
        assert_eq!(matches(Some(&doc), &criteria(json!({"$gt": 1}))), Ok(false));
        // keys that are not operators are field paths, even with a `$`
        let doc = json!({"$price": 3});
        assert_eq!(
            matches(Some(&doc), &criteria(json!({"$price": 3}))),
            Ok(true)
        );
    }

    #[test]
    fn short_circuit_returns_first_failure() {
        let doc = json!({"a": 1, "b": 2});
        let false_then_error = criteria(json!({"a": 2, "b": {"$gt": {}}}));
        assert_eq!(matches(Some(&doc), &false_then_error), Ok(false));

        let error_then_false = criteria(json!({"b": {"$gt": {}}, "a": 2}));
        assert_eq!(
            matches(Some(&doc), &error_then_false),
            Err(MatchError::mismatch(Operator::Gt, "a scalar", "criteria"))
        );
    }

    #[test]
    fn member_evaluation_reaches_into_sequences() {
        let tags = json!(["x", "y"]);
        assert_eq!(
            evaluate_member(Some(&tags), &Criterion::from("y")),
            Ok(true)
        );
        assert_eq!(
            evaluate_member(Some(&tags), &Criterion::from("q")),
            Ok(false)
        );
        assert_eq!(
            evaluate_member(Some(&tags), &Criterion::pattern("^x").unwrap()),
            Ok(true)
        );
        assert_eq!(evaluate_member(None, &Criterion::from("y")), Ok(false));
    }

    #[test]
    fn member_evaluation_propagates_errors() {
        let bad = Criterion::from(json!({"$in": "x"}));
        assert!(evaluate_member(Some(&json!(["x"])), &bad).is_err());
    }
}
