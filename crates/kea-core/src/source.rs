//! The query-result collaborator trait.

use std::error::Error;
use std::ops::Range;

/// An ordered, countable result set that can be sliced and re-ordered.
///
/// This is the only surface the lazy widgets see of the data layer; the
/// query machinery behind it (ORM, cursor, cache) stays on the other
/// side. Slices are contiguous and in the source's natural ascending
/// order. [`order_by`](RowSource::order_by) derives a *new* source with
/// a different ordering and leaves `self` untouched, so the original
/// attachment order can always be re-derived from.
///
/// Fetch failures surface through the associated [`Error`](RowSource::Error)
/// type and propagate to the caller unwrapped; the lazy machinery adds
/// no retry or translation layer on top.
pub trait RowSource {
    /// The row object this source produces.
    type Item;

    /// Error raised by a failed fetch.
    type Error: Error;

    /// Total number of rows in the result set.
    fn count(&self) -> usize;

    /// Fetches the contiguous `range` of rows, ascending.
    ///
    /// Callers only pass ranges within `[0, count())`.
    fn slice(&self, range: Range<usize>) -> Result<Vec<Self::Item>, Self::Error>;

    /// Derives a new source ordered by `attribute`, ascending.
    fn order_by(&self, attribute: &str) -> Self
    where
        Self: Sized;
}
