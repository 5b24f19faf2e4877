//! Model traits for lazily populated tabular widgets.
//!
//! A host toolkit's tree-model contract usually arrives as one wide
//! interface mixing row access, iteration and sorting. Here it is split
//! into two composable capabilities — a random-access provider
//! ([`TableModel`]) and a sortable provider ([`SortableModel`]) — that a
//! single concrete store can implement together.

use crate::column::SortOrder;

/// Logical position of a row in a flat list model.
///
/// Path 0 is the front of the user-visible ordering, whatever the
/// physical ordering of the backing query is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowPath(pub usize);

/// Opaque handle addressing one row, mirroring tree-view iterator
/// semantics: cheap, non-borrowing, and meaningful until the model is
/// reloaded.
///
/// Host code should not peek at the index; it exists so adapters can
/// round-trip handles through toolkit APIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowIter(usize);

impl RowIter {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Random access over a fixed-size, lazily populated row collection.
///
/// `get` never fetches: an unloaded slot reads as `None` until someone
/// explicitly materializes it. Integer index, iterator handle, and path
/// access all resolve to the same underlying slot.
pub trait TableModel {
    /// The row object this model holds.
    type Row;

    /// Total number of rows, loaded or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the row at `index`, or `None` while it is unloaded.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len()`; out-of-range access is a
    /// programming error, not a recoverable condition.
    fn get(&self, index: usize) -> Option<Self::Row>;

    /// Resolves a path to an iterator handle, if the path is in range.
    fn iter_at(&self, path: RowPath) -> Option<RowIter> {
        (path.0 < self.len()).then(|| RowIter::new(path.0))
    }

    /// Advances an iterator handle to the next row.
    fn iter_next(&self, iter: RowIter) -> Option<RowIter> {
        let next = iter.index() + 1;
        (next < self.len()).then(|| RowIter::new(next))
    }

    /// The logical path an iterator handle addresses.
    fn path_of(&self, iter: RowIter) -> RowPath {
        RowPath(iter.index())
    }

    /// Returns the row addressed by an iterator handle.
    fn get_at_iter(&self, iter: RowIter) -> Option<Self::Row> {
        self.get(iter.index())
    }

    /// Returns the row addressed by a path.
    fn get_at_path(&self, path: RowPath) -> Option<Self::Row> {
        self.get(path.0)
    }
}

/// Sort control over a model whose backing data can be re-ordered.
pub trait SortableModel {
    /// Error raised when re-deriving the backing data fails.
    type Error: std::error::Error;

    /// Currently applied sort column and direction, if any.
    fn sort_column(&self) -> Option<(usize, SortOrder)>;

    /// Applies a new sort column and direction.
    ///
    /// A call that changes neither is a no-op. Changing either is a
    /// full reload: the model's contents are discarded and re-derived
    /// under the new ordering.
    fn set_sort_column(&self, column: usize, order: SortOrder) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedModel(Vec<Option<&'static str>>);

    impl TableModel for FixedModel {
        type Row = &'static str;

        fn len(&self) -> usize {
            self.0.len()
        }

        fn get(&self, index: usize) -> Option<&'static str> {
            assert!(index < self.0.len(), "row index {index} out of range");
            self.0[index]
        }
    }

    #[test]
    fn test_access_paths_resolve_to_same_slot() {
        let model = FixedModel(vec![Some("a"), None, Some("c")]);
        let iter = model.iter_at(RowPath(2)).unwrap();
        assert_eq!(model.get(2), Some("c"));
        assert_eq!(model.get_at_iter(iter), Some("c"));
        assert_eq!(model.get_at_path(RowPath(2)), Some("c"));
        assert_eq!(model.path_of(iter), RowPath(2));
    }

    #[test]
    fn test_iter_walk_stops_at_end() {
        let model = FixedModel(vec![Some("a"), None]);
        let first = model.iter_at(RowPath(0)).unwrap();
        let second = model.iter_next(first).unwrap();
        assert_eq!(model.get_at_iter(second), None); // unloaded, not missing
        assert_eq!(model.iter_next(second), None);
    }

    #[test]
    fn test_iter_at_out_of_range() {
        let model = FixedModel(vec![Some("a")]);
        assert_eq!(model.iter_at(RowPath(1)), None);
    }
}
