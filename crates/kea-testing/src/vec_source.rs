//! In-memory row source for tests and demos.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::ops::Range;
use std::rc::Rc;

use kea_core::RowSource;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Error raised by [`VecRowSource`] when its failure switch is on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The simulated backend refused the slice.
    #[error("backend refused slice [{start}, {end})")]
    Refused { start: usize, end: usize },
}

type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// A [`RowSource`] over a plain vector, with named orderings and a log
/// of every physical slice fetched.
///
/// The fetch log and the failure switch are shared between a source and
/// everything [`order_by`](RowSource::order_by) derives from it, so a
/// test keeps one handle and observes the whole family.
pub struct VecRowSource<T> {
    rows: Rc<Vec<T>>,
    orderings: Rc<FxHashMap<String, Comparator<T>>>,
    fetch_log: Rc<RefCell<Vec<Range<usize>>>>,
    fail_fetches: Rc<Cell<bool>>,
}

impl<T> Clone for VecRowSource<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Rc::clone(&self.rows),
            orderings: Rc::clone(&self.orderings),
            fetch_log: Rc::clone(&self.fetch_log),
            fail_fetches: Rc::clone(&self.fail_fetches),
        }
    }
}

impl<T: Clone> VecRowSource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Rc::new(rows),
            orderings: Rc::new(FxHashMap::default()),
            fetch_log: Rc::new(RefCell::new(Vec::new())),
            fail_fetches: Rc::new(Cell::new(false)),
        }
    }

    /// Registers a comparator under `attribute` for
    /// [`order_by`](RowSource::order_by).
    pub fn with_ordering(
        mut self,
        attribute: impl Into<String>,
        compare: impl Fn(&T, &T) -> Ordering + 'static,
    ) -> Self {
        Rc::make_mut(&mut self.orderings).insert(attribute.into(), Rc::new(compare));
        self
    }

    /// Every physical range fetched so far, across the whole derived
    /// family, in order.
    pub fn fetches(&self) -> Vec<Range<usize>> {
        self.fetch_log.borrow().clone()
    }

    pub fn clear_fetches(&self) {
        self.fetch_log.borrow_mut().clear();
    }

    /// Makes subsequent slices fail until switched back off.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.set(fail);
    }
}

impl<T: Clone> RowSource for VecRowSource<T> {
    type Item = T;
    type Error = FetchError;

    fn count(&self) -> usize {
        self.rows.len()
    }

    fn slice(&self, range: Range<usize>) -> Result<Vec<T>, FetchError> {
        if self.fail_fetches.get() {
            return Err(FetchError::Refused {
                start: range.start,
                end: range.end,
            });
        }
        self.fetch_log.borrow_mut().push(range.clone());
        Ok(self.rows[range].to_vec())
    }

    fn order_by(&self, attribute: &str) -> Self {
        let compare = self
            .orderings
            .get(attribute)
            .unwrap_or_else(|| panic!("no ordering registered for attribute {attribute:?}"))
            .clone();
        let mut rows = (*self.rows).clone();
        rows.sort_by(|a, b| compare(a, b));
        Self {
            rows: Rc::new(rows),
            orderings: Rc::clone(&self.orderings),
            fetch_log: Rc::clone(&self.fetch_log),
            fail_fetches: Rc::clone(&self.fail_fetches),
        }
    }
}

#[cfg(test)]
mod tests {
    use kea_core::RowSource;

    use super::{FetchError, VecRowSource};

    #[test]
    fn test_slice_and_log() {
        let source = VecRowSource::new(vec![10, 20, 30, 40]);
        assert_eq!(source.count(), 4);
        assert_eq!(source.slice(1..3).unwrap(), vec![20, 30]);
        assert_eq!(source.fetches(), vec![1..3]);
    }

    #[test]
    fn test_order_by_shares_log() {
        let source = VecRowSource::new(vec![3, 1, 2]).with_ordering("value", |a, b| a.cmp(b));
        let ordered = source.order_by("value");
        assert_eq!(ordered.slice(0..3).unwrap(), vec![1, 2, 3]);
        // The derived source reports into the same log.
        assert_eq!(source.fetches(), vec![0..3]);
        // The original ordering is untouched.
        assert_eq!(source.rows.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_failure_switch() {
        let source = VecRowSource::new(vec![1, 2, 3]);
        source.fail_fetches(true);
        assert_eq!(
            source.slice(0..2),
            Err(FetchError::Refused { start: 0, end: 2 })
        );
        assert!(source.fetches().is_empty());
        source.fail_fetches(false);
        assert!(source.slice(0..2).is_ok());
    }

    #[test]
    #[should_panic(expected = "no ordering registered")]
    fn test_unknown_attribute_panics() {
        let source = VecRowSource::new(vec![1, 2, 3]);
        let _ = source.order_by("missing");
    }
}
