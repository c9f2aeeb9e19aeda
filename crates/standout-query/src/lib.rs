//! Query - Document matcher for in-memory JSON record collections.
//!
//! Query decides which records of a collection satisfy a declarative criteria
//! expression: a nested mapping of field paths to literals, patterns, nested
//! criteria, and `$`-operators. It supports:
//!
//! - Dotted field paths into nested objects (`"address.city"`)
//! - Strict, type-sensitive literal equality
//! - Regular expression patterns
//! - Ordering, membership, presence and disjunction operators
//! - Synchronous and deferred (callback) delivery of results
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use standout_query::{Criteria, Scanner};
//!
//! let scanner = Scanner::new(vec![
//!     json!({"name": "Write docs", "priority": 3, "tags": ["docs"]}),
//!     json!({"name": "Fix bug", "priority": 5, "tags": ["bug", "urgent"]}),
//!     json!({"name": "Old task", "priority": 1, "tags": []}),
//! ]);
//!
//! let criteria = Criteria::new()
//!     .gte("priority", 3)
//!     .is_in("tags", ["urgent"]);
//!
//! let results = scanner.find(&criteria).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0]["name"], "Fix bug");
//! ```
//!
//! # Evaluation
//!
//! A criteria expression is evaluated entry by entry, in insertion order:
//!
//! ```text
//! key is an operator   → apply the operator to the current item
//! key is anything else → resolve it as a path, then evaluate the
//!                        sub-expression against the resolved value
//! ```
//!
//! Every step yields a [`Disposition`]: `Ok(true)`, `Ok(false)`, or
//! `Err(MatchError)` when the criteria have the wrong shape for an operator.
//! The first entry that is not `Ok(true)` decides the result.
//!
//! # Operators
//!
//! | Operator | Operand | Matches when |
//! |----------|---------|--------------|
//! | `$gt` `$gte` `$lt` `$lte` | scalar | the item orders accordingly (same type only) |
//! | `$ne` | scalar | the item is not strictly equal |
//! | `$exists` | ignored | the item is present (`null` counts) |
//! | `$in` | array | the item, or one of its members, matches any element |
//! | `$nin` | array | `$in` does not match |
//! | `$all` | array | the item, or one of its members, matches every element |
//! | `$or` | array of criteria | the item satisfies at least one alternative |

mod criterion;
mod error;
mod eval;
mod op;
mod ordering;
mod path;
mod scan;
mod value;

// Re-export public API
pub use criterion::{Criteria, Criterion};
pub use error::{Disposition, Error, MatchError, Result};
pub use eval::{evaluate, evaluate_member, matches};
pub use op::Operator;
pub use ordering::{compare_scalars, strict_eq};
pub use path::resolve;
pub use scan::{Deferred, Scanner};
pub use value::{type_name, Number, Scalar};
