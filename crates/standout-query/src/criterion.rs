//! Criteria expressions and their sub-expressions.
//!
//! A [`Criteria`] is an ordered mapping from keys to [`Criterion`] values.
//! Keys that name an [`Operator`] apply to the current item; any other key is
//! a dotted field path into it. Criteria can be assembled with the fluent
//! builder or converted from JSON:
//!
//! ```
//! use serde_json::json;
//! use standout_query::Criteria;
//!
//! let built = Criteria::new().gte("age", 18).is_in("tags", ["x"]);
//! let parsed = Criteria::try_from(json!({"age": {"$gte": 18}, "tags": {"$in": ["x"]}})).unwrap();
//!
//! let record = json!({"age": 30, "tags": ["x", "y"]});
//! assert_eq!(built.matches(&record), Ok(true));
//! assert_eq!(parsed.matches(&record), Ok(true));
//! ```

use regex::Regex;
use serde_json::Value;

use crate::error::{Disposition, Error, Result};
use crate::eval;
use crate::op::Operator;
use crate::value::{type_name, Number, Scalar};

/// The value paired with a key in a [`Criteria`].
#[derive(Debug, Clone)]
pub enum Criterion {
    /// Literal `null`.
    Null,
    /// Literal boolean.
    Bool(bool),
    /// Literal number.
    Number(Number),
    /// Literal string.
    String(String),
    /// Pattern tested against string items.
    Pattern(Regex),
    /// List of sub-expressions: operator operands, or a positional match.
    List(Vec<Criterion>),
    /// Nested criteria evaluated against the resolved item.
    Criteria(Criteria),
}

impl Criterion {
    /// Compiles a pattern criterion.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Criterion::Pattern(Regex::new(pattern)?))
    }

    /// Borrows the literal scalar, if this is one.
    pub fn as_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Criterion::Null => Some(Scalar::Null),
            Criterion::Bool(b) => Some(Scalar::Bool(*b)),
            Criterion::Number(n) => Some(Scalar::Number(*n)),
            Criterion::String(s) => Some(Scalar::String(s)),
            _ => None,
        }
    }

    /// Borrows the list elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Criterion]> {
        match self {
            Criterion::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the nested criteria, if present.
    pub fn as_criteria(&self) -> Option<&Criteria> {
        match self {
            Criterion::Criteria(criteria) => Some(criteria),
            _ => None,
        }
    }

    /// Returns a short name for the kind of criterion, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Criterion::Null => "null",
            Criterion::Bool(_) => "bool",
            Criterion::Number(_) => "number",
            Criterion::String(_) => "string",
            Criterion::Pattern(_) => "pattern",
            Criterion::List(_) => "array",
            Criterion::Criteria(_) => "criteria",
        }
    }
}

/// An ordered criteria expression.
///
/// Entries are evaluated in insertion order and evaluation stops at the first
/// entry that does not match, so order decides which error surfaces when
/// several entries would fail. Setting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    entries: Vec<(String, Criterion)>,
}

impl Criteria {
    /// Creates an empty criteria expression, which matches everything.
    pub fn new() -> Self {
        Criteria::default()
    }

    /// Parses criteria from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Criteria::try_from(value)
    }

    /// Evaluates these criteria against a record.
    pub fn matches(&self, record: &Value) -> Disposition {
        eval::matches(Some(record), self)
    }

    /// Sets `key` to `criterion`. `key` may be a field path or an operator name.
    pub fn field(mut self, key: impl Into<String>, criterion: impl Into<Criterion>) -> Self {
        self.insert(key.into(), criterion.into());
        self
    }

    /// Applies `op` to the current item.
    pub fn op(self, op: Operator, operand: impl Into<Criterion>) -> Self {
        self.field(op.as_str(), operand)
    }

    /// Adds `op` to the nested criteria at `path`, creating them if needed.
    ///
    /// Consecutive calls on the same path accumulate:
    /// `.gt("age", 1).lt("age", 5)` is `{"age": {"$gt": 1, "$lt": 5}}`.
    pub fn with_operator(
        mut self,
        path: impl Into<String>,
        op: Operator,
        operand: impl Into<Criterion>,
    ) -> Self {
        let path = path.into();
        let operand = operand.into();
        match self.get_mut(&path) {
            Some(Criterion::Criteria(nested)) => {
                nested.insert(op.as_str().to_string(), operand);
            }
            _ => {
                let nested = Criteria::new().op(op, operand);
                self.insert(path, Criterion::Criteria(nested));
            }
        }
        self
    }

    // ========================================================================
    // Shorthand builders
    // ========================================================================

    /// Field at `path` strictly equals `value`.
    pub fn eq(self, path: impl Into<String>, value: impl Into<Criterion>) -> Self {
        self.field(path, value)
    }

    /// Field at `path` is not strictly equal to `value`.
    pub fn ne(self, path: impl Into<String>, value: impl Into<Criterion>) -> Self {
        self.with_operator(path, Operator::Ne, value)
    }

    /// Field at `path` is greater than `value`.
    pub fn gt(self, path: impl Into<String>, value: impl Into<Criterion>) -> Self {
        self.with_operator(path, Operator::Gt, value)
    }

    /// Field at `path` is greater than or equal to `value`.
    pub fn gte(self, path: impl Into<String>, value: impl Into<Criterion>) -> Self {
        self.with_operator(path, Operator::Gte, value)
    }

    /// Field at `path` is less than `value`.
    pub fn lt(self, path: impl Into<String>, value: impl Into<Criterion>) -> Self {
        self.with_operator(path, Operator::Lt, value)
    }

    /// Field at `path` is less than or equal to `value`.
    pub fn lte(self, path: impl Into<String>, value: impl Into<Criterion>) -> Self {
        self.with_operator(path, Operator::Lte, value)
    }

    /// Field at `path` is present (a `null` value counts as present).
    pub fn exists(self, path: impl Into<String>) -> Self {
        self.with_operator(path, Operator::Exists, true)
    }

    /// Field at `path` matches any of `values`.
    pub fn is_in<I>(self, path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Criterion>,
    {
        self.with_operator(path, Operator::In, list(values))
    }

    /// Field at `path` matches none of `values`.
    pub fn not_in<I>(self, path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Criterion>,
    {
        self.with_operator(path, Operator::Nin, list(values))
    }

    /// Field at `path` matches every one of `values`.
    pub fn all<I>(self, path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Criterion>,
    {
        self.with_operator(path, Operator::All, list(values))
    }

    /// The current item satisfies at least one of `alternatives`.
    pub fn or<I>(self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = Criteria>,
    {
        self.op(Operator::Or, list(alternatives))
    }

    /// Field at `path` is a string matching `pattern`.
    pub fn regex(self, path: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(self.field(path, Criterion::pattern(pattern)?))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the criterion for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&Criterion> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, criterion)| criterion)
    }

    /// Iterates over entries in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.entries
            .iter()
            .map(|(key, criterion)| (key.as_str(), criterion))
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Criterion> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, criterion)| criterion)
    }

    fn insert(&mut self, key: String, criterion: Criterion) {
        match self.get_mut(&key) {
            Some(existing) => *existing = criterion,
            None => self.entries.push((key, criterion)),
        }
    }
}

fn list<I>(values: I) -> Criterion
where
    I: IntoIterator,
    I::Item: Into<Criterion>,
{
    Criterion::List(values.into_iter().map(Into::into).collect())
}

impl<K, C> FromIterator<(K, C)> for Criteria
where
    K: Into<String>,
    C: Into<Criterion>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Criteria::new(), |criteria, (key, criterion)| {
                criteria.field(key, criterion)
            })
    }
}

impl TryFrom<Value> for Criteria {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(Error::NotAnObject {
                actual: type_name(&other),
            }),
        }
    }
}

impl From<Value> for Criterion {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Criterion::Null,
            Value::Bool(b) => Criterion::Bool(b),
            Value::Number(n) => Criterion::Number(Number::from(&n)),
            Value::String(s) => Criterion::String(s),
            Value::Array(items) => list(items),
            Value::Object(map) => Criterion::Criteria(map.into_iter().collect()),
        }
    }
}

impl From<&Value> for Criterion {
    fn from(value: &Value) -> Self {
        Criterion::from(value.clone())
    }
}

impl From<Criteria> for Criterion {
    fn from(criteria: Criteria) -> Self {
        Criterion::Criteria(criteria)
    }
}

impl From<Regex> for Criterion {
    fn from(regex: Regex) -> Self {
        Criterion::Pattern(regex)
    }
}

impl From<String> for Criterion {
    fn from(s: String) -> Self {
        Criterion::String(s)
    }
}

impl From<&str> for Criterion {
    fn from(s: &str) -> Self {
        Criterion::String(s.to_string())
    }
}

impl From<bool> for Criterion {
    fn from(b: bool) -> Self {
        Criterion::Bool(b)
    }
}

impl From<Number> for Criterion {
    fn from(n: Number) -> Self {
        Criterion::Number(n)
    }
}

impl From<i32> for Criterion {
    fn from(n: i32) -> Self {
        Criterion::Number(Number::from(n))
    }
}

impl From<i64> for Criterion {
    fn from(n: i64) -> Self {
        Criterion::Number(Number::from(n))
    }
}

impl From<u32> for Criterion {
    fn from(n: u32) -> Self {
        Criterion::Number(Number::from(n))
    }
}

impl From<u64> for Criterion {
    fn from(n: u64) -> Self {
        Criterion::Number(Number::from(n))
    }
}

impl From<usize> for Criterion {
    fn from(n: usize) -> Self {
        Criterion::Number(Number::from(n))
    }
}

impl From<f64> for Criterion {
    fn from(n: f64) -> Self {
        Criterion::Number(Number::from(n))
    }
}

impl<T: Into<Criterion>> From<Vec<T>> for Criterion {
    fn from(items: Vec<T>) -> Self {
        list(items)
    }
}

impl<T: Into<Criterion>> From<Option<T>> for Criterion {
    fn from(value: Option<T>) -> Self {
        value.map_or(Criterion::Null, Into::into)
    }
}
