//! Lazily populated row store over a sliceable result set.

use std::cell::RefCell;
use std::rc::Rc;

use kea_core::{Column, RowPath, RowSource, SortOrder, SortableModel, TableModel};
use smallvec::SmallVec;

/// A fixed-size, addressable row collection backed by an expensive
/// result set.
///
/// Only requested subranges are materialized; every other slot holds
/// the unloaded sentinel and reads as `None`. Reading never fetches —
/// callers materialize explicitly through [`load_range`](Self::load_range).
///
/// Changing the sort column is a stop-the-world reload: the backing
/// source is re-derived with the new ordering, every slot reverts to
/// unloaded, and the initial window is fetched again. Outside of that,
/// a loaded slot never reverts to unloaded.
///
/// Store values are cheap handles; clones share one underlying store.
pub struct LazyRowStore<S: RowSource> {
    inner: Rc<RefCell<StoreInner<S>>>,
}

impl<S: RowSource> Clone for LazyRowStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct StoreInner<S: RowSource> {
    /// Result set as originally attached; re-sorts derive from this.
    orig_source: S,

    /// Re-ordered derivation currently being sliced, if a sort was
    /// applied after attachment.
    sorted: Option<S>,

    columns: Rc<[Column]>,
    count: usize,
    initial_count: usize,
    sort_column: Option<usize>,
    sort_order: SortOrder,
    slots: Vec<Option<S::Item>>,

    row_loaded: Vec<(u64, Box<dyn Fn(RowPath)>)>,
    sort_changed: Vec<(u64, Box<dyn Fn()>)>,
    next_callback_id: u64,
}

impl<S: RowSource> StoreInner<S> {
    fn current(&self) -> &S {
        self.sorted.as_ref().unwrap_or(&self.orig_source)
    }
}

impl<S: RowSource> LazyRowStore<S> {
    /// Builds a store over `source` and eagerly materializes the first
    /// `initial_count` rows, which should cover at least one visible
    /// page.
    ///
    /// `sort_column` and `sort_order` describe the ordering `source`
    /// already arrives in (typically the view's current sort
    /// indicator); they are recorded, not re-applied.
    pub fn new(
        source: S,
        columns: Rc<[Column]>,
        initial_count: usize,
        sort_column: Option<usize>,
        sort_order: SortOrder,
    ) -> Result<Self, S::Error> {
        let count = source.count();
        log::debug!("attaching result set with {count} rows");
        let store = Self {
            inner: Rc::new(RefCell::new(StoreInner {
                orig_source: source,
                sorted: None,
                columns,
                count,
                initial_count,
                sort_column,
                sort_order,
                slots: (0..count).map(|_| None).collect(),
                row_loaded: Vec::new(),
                sort_changed: Vec::new(),
                next_callback_id: 1,
            })),
        };
        store.load_range(0, initial_count)?;
        Ok(store)
    }

    /// Materializes the logical range `[start, end)`.
    ///
    /// `end` is clamped to the total count. Already-loaded leading
    /// slots are skipped: the first unloaded slot becomes the effective
    /// start, and the requested span length is kept by extending `end`
    /// from there (clamped again), so re-requesting an overlapping
    /// range is cheap and still reads ahead by the full span. A range
    /// that is already fully loaded fetches nothing.
    ///
    /// Under descending order the logical range maps to the physical
    /// query range `[count - end, count - start)`, fetched in the
    /// query's natural ascending order and consumed in reverse; the
    /// backing sources cannot reverse-iterate a slice, so the slice is
    /// materialized first and then reversed.
    ///
    /// Returns `Ok(true)` when at least one row was newly materialized,
    /// which is the caller's cue to refresh selection state.
    pub fn load_range(&self, start: usize, end: usize) -> Result<bool, S::Error> {
        let mut loaded: SmallVec<[RowPath; 16]> = SmallVec::new();
        {
            let mut inner = self.inner.borrow_mut();
            let count = inner.count;
            let end = end.min(count);
            if start >= end {
                return Ok(false);
            }
            let span = end - start;

            // Skip the already-loaded prefix.
            let Some(start) = (start..end).find(|&i| inner.slots[i].is_none()) else {
                log::trace!("rows [{start}, {end}) already materialized");
                return Ok(false);
            };
            let end = (start + span).min(count);

            let items = if inner.sort_order.is_descending() {
                // The logical window sits at the far side of the
                // physical ordering; fetch ascending, consume reversed.
                let mut items = inner.current().slice(count - end..count - start)?;
                items.reverse();
                items
            } else {
                inner.current().slice(start..end)?
            };

            log::debug!("materializing rows [{start}, {end})");
            for (i, item) in (start..end).zip(items) {
                let slot = &mut inner.slots[i];
                if slot.is_some() {
                    // Filled since the scan; keep the existing row.
                    continue;
                }
                *slot = Some(item);
                loaded.push(RowPath(i));
            }
        }

        // Mutable borrow released: listeners may read the store freely.
        let inner = self.inner.borrow();
        for path in &loaded {
            for (_, callback) in &inner.row_loaded {
                callback(*path);
            }
        }
        Ok(!loaded.is_empty())
    }

    /// Number of slots currently holding a materialized row.
    pub fn materialized_count(&self) -> usize {
        self.inner
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// The column descriptors this store sorts against.
    pub fn columns(&self) -> Rc<[Column]> {
        Rc::clone(&self.inner.borrow().columns)
    }

    /// Registers a listener invoked with the logical path of every
    /// newly materialized row. Returns an id for
    /// [`remove_row_loaded_callback`](Self::remove_row_loaded_callback).
    pub fn add_row_loaded_callback(&self, callback: Box<dyn Fn(RowPath)>) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_callback_id;
        inner.next_callback_id += 1;
        inner.row_loaded.push((id, callback));
        id
    }

    pub fn remove_row_loaded_callback(&self, id: u64) {
        self.inner
            .borrow_mut()
            .row_loaded
            .retain(|(callback_id, _)| *callback_id != id);
    }

    /// Registers a listener invoked after a sort change finished
    /// reloading the store.
    pub fn add_sort_changed_callback(&self, callback: Box<dyn Fn()>) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_callback_id;
        inner.next_callback_id += 1;
        inner.sort_changed.push((id, callback));
        id
    }

    pub fn remove_sort_changed_callback(&self, id: u64) {
        self.inner
            .borrow_mut()
            .sort_changed
            .retain(|(callback_id, _)| *callback_id != id);
    }
}

impl<S: RowSource> TableModel for LazyRowStore<S>
where
    S::Item: Clone,
{
    type Row = S::Item;

    fn len(&self) -> usize {
        self.inner.borrow().count
    }

    fn get(&self, index: usize) -> Option<S::Item> {
        let inner = self.inner.borrow();
        assert!(
            index < inner.count,
            "row index {index} out of range (count {})",
            inner.count
        );
        inner.slots[index].clone()
    }
}

impl<S: RowSource> SortableModel for LazyRowStore<S> {
    type Error = S::Error;

    fn sort_column(&self) -> Option<(usize, SortOrder)> {
        let inner = self.inner.borrow();
        inner.sort_column.map(|column| (column, inner.sort_order))
    }

    /// Applies a new sort column and direction.
    ///
    /// A call that changes neither is a no-op. Otherwise the backing
    /// source is re-derived from the original result set, every slot
    /// reverts to unloaded, the initial window is re-fetched, and the
    /// sort-changed listeners fire so dependent views can react (for
    /// instance by scrolling back to the top).
    ///
    /// # Panics
    ///
    /// Panics when `column` is out of range or has no source attribute;
    /// both are programming errors.
    fn set_sort_column(&self, column: usize, order: SortOrder) -> Result<(), S::Error> {
        let initial_count = {
            let mut inner = self.inner.borrow_mut();
            if inner.sort_column == Some(column) && inner.sort_order == order {
                return Ok(());
            }
            inner.sort_column = Some(column);
            inner.sort_order = order;

            let descriptor = &inner.columns[column];
            let attribute = descriptor.attribute.clone().unwrap_or_else(|| {
                panic!(
                    "column {column} ({:?}) has no source attribute to sort by",
                    descriptor.title
                )
            });
            let sorted = inner.orig_source.order_by(&attribute);
            inner.count = sorted.count();
            inner.slots = (0..inner.count).map(|_| None).collect();
            inner.sorted = Some(sorted);
            log::debug!(
                "sort changed to column {column} ({order:?}); reloading {} rows",
                inner.count
            );
            inner.initial_count
        };
        self.load_range(0, initial_count)?;

        let inner = self.inner.borrow();
        for (_, callback) in &inner.sort_changed {
            callback();
        }
        Ok(())
    }
}
