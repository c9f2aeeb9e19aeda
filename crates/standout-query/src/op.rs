//! The operator table.
//!
//! [`Operator`] is the closed set of `$`-prefixed keys the criteria evaluator
//! recognises. Every operator applies to the *current* item (not a sub-field)
//! and returns the same [`Disposition`] as any other evaluation step, so the
//! logical operators recurse through the same machinery as plain matching.

use std::cmp::Ordering;

use log::trace;
use serde_json::Value;

use crate::criterion::Criterion;
use crate::error::{Disposition, MatchError};
use crate::eval::{evaluate_member, matches};
use crate::ordering::{compare_scalars, strict_eq};
use crate::value::Scalar;

/// Operator recognised as a criteria key.
///
/// Operators are grouped by what they do:
/// - **Ordering**: `Gt`, `Gte`, `Lt`, `Lte`
/// - **Equality**: `Ne`
/// - **Presence**: `Exists`
/// - **Membership**: `In`, `Nin`, `All`
/// - **Logical**: `Or`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Strictly not equal.
    Ne,
    /// Item is present.
    Exists,
    /// Item matches one of a list.
    In,
    /// Item matches none of a list.
    Nin,
    /// Item matches every element of a list.
    All,
    /// Item satisfies one of a list of criteria.
    Or,
}

impl Operator {
    /// Every operator, in table order.
    pub const ALL: [Operator; 10] = [
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Ne,
        Operator::Exists,
        Operator::In,
        Operator::Nin,
        Operator::All,
        Operator::Or,
    ];

    /// Looks up the operator named by a criteria key.
    ///
    /// Returns `None` for anything else, which the evaluator then treats as a
    /// field path. A field literally named like an operator is therefore
    /// unreachable.
    pub fn from_key(key: &str) -> Option<Operator> {
        match key {
            "$gt" => Some(Operator::Gt),
            "$gte" => Some(Operator::Gte),
            "$lt" => Some(Operator::Lt),
            "$lte" => Some(Operator::Lte),
            "$ne" => Some(Operator::Ne),
            "$exists" => Some(Operator::Exists),
            "$in" => Some(Operator::In),
            "$nin" => Some(Operator::Nin),
            "$all" => Some(Operator::All),
            "$or" => Some(Operator::Or),
            _ => None,
        }
    }

    /// Returns the key this operator is written as.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::Ne => "$ne",
            Operator::Exists => "$exists",
            Operator::In => "$in",
            Operator::Nin => "$nin",
            Operator::All => "$all",
            Operator::Or => "$or",
        }
    }

    /// Evaluates an ordering comparison given an ordering result.
    ///
    /// Returns `false` for operators that are not ordering-based.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Applies this operator to `item` with the given operand.
    pub fn apply(self, item: Option<&Value>, operand: &Criterion) -> Disposition {
        trace!("{} against {:?}", self, item);
        match self {
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
                let expected = self.scalar_operand(operand)?;
                let ordering = item
                    .and_then(Scalar::from_json)
                    .and_then(|actual| compare_scalars(actual, expected));
                Ok(ordering.is_some_and(|o| self.eval_ordering(o)))
            }
            Operator::Ne => {
                let expected = self.scalar_operand(operand)?;
                let equal = item
                    .and_then(Scalar::from_json)
                    .is_some_and(|actual| strict_eq(actual, expected));
                Ok(!equal)
            }
            Operator::Exists => Ok(item.is_some()),
            Operator::In => {
                let candidates = self.list_operand(operand)?;
                Ok(candidates
                    .iter()
                    .any(|candidate| evaluate_member(item, candidate) == Ok(true)))
            }
            Operator::Nin => Operator::In.apply(item, operand).map(|found| !found),
            Operator::All => {
                for required in self.list_operand(operand)? {
                    if !evaluate_member(item, required)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Operator::Or => {
                let alternatives = self.list_operand(operand)?;
                let mut disposition = Err(MatchError::EmptyOr);
                for alternative in alternatives {
                    let criteria = alternative.as_criteria().ok_or_else(|| {
                        MatchError::mismatch(self, "an array of criteria", alternative.kind())
                    })?;
                    disposition = matches(item, criteria);
                    if disposition == Ok(true) {
                        break;
                    }
                }
                disposition
            }
        }
    }

    fn scalar_operand(self, operand: &Criterion) -> Result<Scalar<'_>, MatchError> {
        operand
            .as_scalar()
            .ok_or_else(|| MatchError::mismatch(self, "a scalar", operand.kind()))
    }

    fn list_operand(self, operand: &Criterion) -> Result<&[Criterion], MatchError> {
        operand
            .as_list()
            .ok_or_else(|| MatchError::mismatch(self, "an array", operand.kind()))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
