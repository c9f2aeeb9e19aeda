//! Native ordering and strict equality between scalars.
//!
//! Both functions only relate values of the same JSON type. Numbers compare by
//! value across representations; everything else of differing types is
//! unordered and unequal.

use std::cmp::Ordering;

use crate::value::Scalar;

/// Compares two scalars of the same type.
///
/// Returns `None` if the types don't match, either side is `null`, or a
/// numeric comparison involves NaN.
pub fn compare_scalars(a: Scalar<'_>, b: Scalar<'_>) -> Option<Ordering> {
    match (a, b) {
        (Scalar::String(a), Scalar::String(b)) => Some(a.cmp(b)),
        (Scalar::Number(a), Scalar::Number(b)) => a.compare(b),
        (Scalar::Bool(a), Scalar::Bool(b)) => Some(a.cmp(&b)),

        // Type mismatch or null - cannot compare
        _ => None,
    }
}

/// Type-sensitive equality: `1 == 1.0`, but `1 != "1"` and `null == null`.
pub fn strict_eq(a: Scalar<'_>, b: Scalar<'_>) -> bool {
    match (a, b) {
        (Scalar::Null, Scalar::Null) => true,
        _ => compare_scalars(a, b) == Some(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn compare_strings() {
        let a = Scalar::String("apple");
        let b = Scalar::String("banana");

        assert_eq!(compare_scalars(a, b), Some(Ordering::Less));
        assert_eq!(compare_scalars(b, a), Some(Ordering::Greater));
        assert_eq!(compare_scalars(a, a), Some(Ordering::Equal));
    }

    #[test]
    fn compare_numbers() {
        let a = Scalar::Number(Number::I64(10));
        let b = Scalar::Number(Number::F64(20.5));

        assert_eq!(compare_scalars(a, b), Some(Ordering::Less));
        assert_eq!(compare_scalars(b, a), Some(Ordering::Greater));
    }

    #[test]
    fn compare_bools() {
        // false < true
        assert_eq!(
            compare_scalars(Scalar::Bool(false), Scalar::Bool(true)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn compare_type_mismatch() {
        let s = Scalar::String("42");
        let n = Scalar::Number(Number::I64(42));

        assert_eq!(compare_scalars(s, n), None);
        assert_eq!(compare_scalars(Scalar::Null, Scalar::Null), None);
        assert_eq!(compare_scalars(Scalar::Null, n), None);
    }

    #[test]
    fn strict_equality() {
        let one = Scalar::Number(Number::I64(1));

        assert!(strict_eq(one, Scalar::Number(Number::F64(1.0))));
        assert!(strict_eq(one, Scalar::Number(Number::U64(1))));
        assert!(!strict_eq(one, Scalar::String("1")));
        assert!(!strict_eq(Scalar::Bool(true), one));
        assert!(strict_eq(Scalar::Null, Scalar::Null));
        assert!(!strict_eq(Scalar::Null, Scalar::Bool(false)));
    }

    #[test]
    fn nan_is_never_equal() {
        let nan = Scalar::Number(Number::F64(f64::NAN));
        assert!(!strict_eq(nan, nan));
    }
}
