//! Collection scanning and result delivery.
//!
//! A [`Scanner`] binds an ordered list of records and evaluates criteria
//! against each of them in turn. Results are delivered synchronously
//! ([`Scanner::find`], [`Scanner::try_find`]) or through a callback carried
//! by a [`Deferred`] future ([`Scanner::find_deferred`]). Every mode runs the
//! same scan, so identical inputs always produce identical outcomes.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::criterion::Criteria;
use crate::error::{Error, Result};

/// A fixed, ordered collection of records to search.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_query::{Criteria, Scanner};
///
/// let scanner = Scanner::new(vec![
///     json!({"age": 30, "tags": ["x", "y"]}),
///     json!({"age": 17, "tags": ["z"]}),
/// ]);
///
/// let criteria = Criteria::new().gte("age", 18).is_in("tags", ["x"]);
/// let found = scanner.find(&criteria).unwrap();
/// assert_eq!(found, vec![&json!({"age": 30, "tags": ["x", "y"]})]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    records: Vec<Value>,
}

impl Scanner {
    /// Binds a collection of records.
    pub fn new(records: Vec<Value>) -> Self {
        Scanner { records }
    }

    /// Serializes each item into a record and binds the result.
    pub fn from_records<I, T>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let records = items
            .into_iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Scanner::new(records))
    }

    /// Returns the bound records in scan order.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Returns the number of bound records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are bound.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns every record matching `criteria`, or the first evaluation error.
    ///
    /// Records are evaluated in order. The first error stops the scan and
    /// discards the matches collected so far.
    pub fn try_find(&self, criteria: &Criteria) -> Result<Vec<&Value>> {
        let mut found = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            match criteria.matches(record) {
                Ok(true) => found.push(record),
                Ok(false) => {}
                Err(source) => return Err(Error::Scan { index, source }),
            }
        }
        debug!(
            "scanned {} records, {} matched",
            self.records.len(),
            found.len()
        );
        Ok(found)
    }

    /// Returns every record matching `criteria`, or `None` if evaluation failed.
    ///
    /// The error itself is only logged at `warn` level, so `None` always
    /// comes paired with a `find failed` log record. Use
    /// [`Scanner::try_find`] to inspect the error directly.
    pub fn find(&self, criteria: &Criteria) -> Option<Vec<&Value>> {
        match self.try_find(criteria) {
            Ok(found) => Some(found),
            Err(err) => {
                warn!("find failed: {}", err);
                None
            }
        }
    }

    /// Scans now and returns a future that hands the outcome to `callback`.
    ///
    /// The scan has fully completed before this returns. The callback never
    /// runs inside this call: the returned future yields to its executor once
    /// and delivers on the following poll. Dropping the future before then
    /// delivers immediately, so `callback` runs exactly once either way.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use futures::executor::block_on;
    /// use serde_json::json;
    /// use standout_query::{Criteria, Scanner};
    ///
    /// let scanner = Scanner::new(vec![json!({"n": 1}), json!({"n": 2})]);
    /// let count = Cell::new(0);
    /// let deferred = scanner.find_deferred(&Criteria::new().gt("n", 1), |outcome| {
    ///     count.set(outcome.unwrap().len());
    /// });
    /// assert_eq!(count.get(), 0);
    ///
    /// block_on(deferred);
    /// assert_eq!(count.get(), 1);
    /// ```
    pub fn find_deferred<'a, F>(&'a self, criteria: &Criteria, callback: F) -> Deferred<'a, F>
    where
        F: FnOnce(Result<Vec<&'a Value>>),
    {
        let outcome = self.try_find(criteria);
        debug!("deferring find callback");
        Deferred {
            outcome: Some(outcome),
            callback: Some(callback),
            yielded: false,
        }
    }

    // ========================================================================
    // Convenience queries
    // ========================================================================

    /// Counts matching records.
    pub fn count(&self, criteria: &Criteria) -> Result<usize> {
        self.try_find(criteria).map(|found| found.len())
    }

    /// Returns `true` if any record matches.
    ///
    /// Stops at the first match, so records after it are never evaluated.
    pub fn any(&self, criteria: &Criteria) -> Result<bool> {
        self.position(criteria).map(|index| index.is_some())
    }

    /// Returns the first matching record.
    pub fn first(&self, criteria: &Criteria) -> Result<Option<&Value>> {
        Ok(self
            .position(criteria)?
            .map(|index| &self.records[index]))
    }

    /// Returns the index of the first matching record.
    pub fn position(&self, criteria: &Criteria) -> Result<Option<usize>> {
        for (index, record) in self.records.iter().enumerate() {
            match criteria.matches(record) {
                Ok(true) => return Ok(Some(index)),
                Ok(false) => {}
                Err(source) => return Err(Error::Scan { index, source }),
            }
        }
        Ok(None)
    }
}

impl FromIterator<Value> for Scanner {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Scanner::new(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for Scanner {
    fn from(records: Vec<Value>) -> Self {
        Scanner::new(records)
    }
}

/// Future returned by [`Scanner::find_deferred`].
///
/// Holds a finished scan outcome until the callback is delivered. The first
/// poll wakes the task and returns `Pending`; the second delivers and
/// completes.
#[must_use = "the callback is delivered when this future is polled to completion or dropped"]
pub struct Deferred<'a, F>
where
    F: FnOnce(Result<Vec<&'a Value>>),
{
    outcome: Option<Result<Vec<&'a Value>>>,
    callback: Option<F>,
    yielded: bool,
}

impl<'a, F> Deferred<'a, F>
where
    F: FnOnce(Result<Vec<&'a Value>>),
{
    /// Returns `true` until the callback has been delivered.
    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }

    fn deliver(&mut self) -> bool {
        match (self.callback.take(), self.outcome.take()) {
            (Some(callback), Some(outcome)) => {
                callback(outcome);
                true
            }
            _ => false,
        }
    }
}

// No field is structurally pinned.
impl<'a, F> Unpin for Deferred<'a, F> where F: FnOnce(Result<Vec<&'a Value>>) {}

impl<'a, F> Future for Deferred<'a, F>
where
    F: FnOnce(Result<Vec<&'a Value>>),
{
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if !self.yielded {
            self.yielded = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        self.deliver();
        Poll::Ready(())
    }
}

impl<'a, F> Drop for Deferred<'a, F>
where
    F: FnOnce(Result<Vec<&'a Value>>),
{
    fn drop(&mut self) {
        if self.deliver() {
            debug!("deferred find dropped before completion, delivered on drop");
        }
    }
}

impl<'a, F> fmt::Debug for Deferred<'a, F>
where
    F: FnOnce(Result<Vec<&'a Value>>),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("pending", &self.is_pending())
            .field("yielded", &self.yielded)
            .finish()
    }
}
