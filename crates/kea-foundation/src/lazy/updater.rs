//! Scroll-driven prefetch for lazy row stores.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

use kea_core::{Column, RowSource, SortOrder, TableModel};

use super::debounce::{DebounceGate, TimerHost};
use super::row_store::LazyRowStore;
use crate::view::ListView;

/// How many extra rows to fetch before and after the visible page.
pub const EXTRA_ROWS: usize = 30;

/// How long to wait after the last scroll signal before loading.
pub const SCROLL_TIMEOUT: Duration = Duration::from_millis(10);

/// How many rows to load when a result set is first attached.
pub const INITIAL_ROWS: usize = 50;

/// Tunables for [`LazyListUpdater`].
#[derive(Clone, Debug)]
pub struct UpdaterConfig {
    /// Rows to prefetch beyond each edge of the visible range.
    pub extra_rows: usize,

    /// Quiescence interval after the last scroll signal.
    pub scroll_debounce: Duration,

    /// Rows materialized eagerly on attach; should cover at least one
    /// visible page.
    pub initial_rows: usize,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            extra_rows: EXTRA_ROWS,
            scroll_debounce: SCROLL_TIMEOUT,
            initial_rows: INITIAL_ROWS,
        }
    }
}

impl UpdaterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extra_rows(mut self, extra_rows: usize) -> Self {
        self.extra_rows = extra_rows;
        self
    }

    pub fn scroll_debounce(mut self, interval: Duration) -> Self {
        self.scroll_debounce = interval;
        self
    }

    pub fn initial_rows(mut self, initial_rows: usize) -> Self {
        self.initial_rows = initial_rows;
        self
    }
}

/// Keeps the visible viewport (plus a safety margin) materialized while
/// the user scrolls a lazy model.
///
/// Every scroll signal schedules a one-shot timer; a burst of signals
/// inside the debounce window collapses to the newest one, so at most
/// one load happens per quiescent scroll period and the data layer is
/// never flooded during a fling. Timers are cooperative — the host
/// event loop drives them through [`TimerHost`] — and nothing here
/// blocks beyond the paged fetch itself.
///
/// Updater values are cheap handles; clones share state.
pub struct LazyListUpdater<S: RowSource, V> {
    inner: Rc<RefCell<UpdaterInner<S, V>>>,
    timers: Rc<dyn TimerHost>,
    gate: DebounceGate,
}

impl<S: RowSource, V> Clone for LazyListUpdater<S, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            timers: Rc::clone(&self.timers),
            gate: self.gate.clone(),
        }
    }
}

struct UpdaterInner<S: RowSource, V> {
    view: Rc<V>,
    columns: Rc<[Column]>,
    config: UpdaterConfig,
    store: Option<LazyRowStore<S>>,
    original_model: Option<Rc<dyn TableModel<Row = S::Item>>>,

    /// Pixel height of one row; -1.0 until first measured.
    row_height: f32,
}

impl<S, V> LazyListUpdater<S, V>
where
    S: RowSource + 'static,
    S::Item: Clone + 'static,
    V: ListView<Row = S::Item> + 'static,
{
    pub fn new(view: Rc<V>, columns: Rc<[Column]>, timers: Rc<dyn TimerHost>) -> Self {
        Self::with_config(view, columns, timers, UpdaterConfig::default())
    }

    pub fn with_config(
        view: Rc<V>,
        columns: Rc<[Column]>,
        timers: Rc<dyn TimerHost>,
        config: UpdaterConfig,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(UpdaterInner {
                view,
                columns,
                config,
                store: None,
                original_model: None,
                row_height: -1.0,
            })),
            timers,
            gate: DebounceGate::new(),
        }
    }

    /// Installs a lazy model over `results`, remembering the view's
    /// current model so [`detach`](Self::detach) can restore it.
    ///
    /// The new store is seeded with the sort indicator the view
    /// currently shows and eagerly loads the configured initial window.
    pub fn attach(&self, results: S) -> Result<(), S::Error> {
        let mut inner = self.inner.borrow_mut();
        let (sort_column, sort_order) = inner.view.sort_state();
        let store = LazyRowStore::new(
            results,
            Rc::clone(&inner.columns),
            inner.config.initial_rows,
            sort_column,
            sort_order,
        )?;
        inner.original_model = inner.view.model();
        inner.view.set_model(Some(Rc::new(store.clone())));
        inner.store = Some(store);
        Ok(())
    }

    /// Restores the model the view had before [`attach`](Self::attach).
    ///
    /// In-flight debounce timers become inert: their generation is
    /// superseded and the store they target is gone, so they expire
    /// without loading.
    pub fn detach(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.store.take().is_none() {
            return;
        }
        self.gate.arm();
        let original = inner.original_model.take();
        inner.view.set_model(original);
    }

    /// Handle to the attached store, for wiring host-side sort requests
    /// to [`SortableModel::set_sort_column`](kea_core::SortableModel::set_sort_column).
    pub fn store(&self) -> Option<LazyRowStore<S>> {
        self.inner.borrow().store.clone()
    }

    /// Handles a scroll-position change notification from the view.
    ///
    /// The visible range is captured immediately; the load itself runs
    /// after the debounce interval of quiescence, and only for the
    /// newest signal of a burst.
    pub fn on_scroll_changed(&self) {
        let (visible, delay) = {
            let inner = self.inner.borrow();
            (inner.view.visible_range(), inner.config.scroll_debounce)
        };
        let ticket = self.gate.arm();
        let gate = self.gate.clone();
        let weak = Rc::downgrade(&self.inner);
        self.timers.schedule_once(
            delay,
            Box::new(move || {
                if !gate.is_latest(ticket) {
                    // More scroll signals arrived; the newest timer
                    // will perform the load.
                    log::trace!("superseded scroll load for rows {visible:?}");
                    return;
                }
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                Self::load_around(&inner, visible);
            }),
        );
    }

    fn load_around(inner: &Rc<RefCell<UpdaterInner<S, V>>>, visible: Range<usize>) {
        let (store, view, extra_rows) = {
            let inner = inner.borrow();
            let Some(store) = inner.store.clone() else {
                return;
            };
            (store, Rc::clone(&inner.view), inner.config.extra_rows)
        };
        let start = visible.start.saturating_sub(extra_rows);
        let end = visible.end.saturating_add(extra_rows);
        match store.load_range(start, end) {
            // Rows appeared under the viewport; selection tracking may
            // now point at the wrong rows.
            Ok(true) => view.refresh_selection(),
            Ok(false) => {}
            Err(error) => log::error!("deferred row fetch failed: {error}"),
        }
    }

    /// Handles the view's sorting-changed notification.
    ///
    /// The data has been fully reordered and reloaded underneath the
    /// viewport; the old scroll position is meaningless, so the view
    /// goes back to the origin instead of trying to preserve it.
    pub fn on_sorting_changed(&self, _attribute: &str, _order: SortOrder) {
        self.inner.borrow().view.scroll_to_origin();
    }

    /// Pixel height of one row, measured on first use and cached.
    ///
    /// The cache is not re-derived automatically; call
    /// [`invalidate_row_height`](Self::invalidate_row_height) after a
    /// layout change.
    pub fn row_height(&self) -> f32 {
        let mut inner = self.inner.borrow_mut();
        if inner.row_height < 0.0 {
            inner.row_height = inner.view.measure_row_height();
        }
        inner.row_height
    }

    /// Drops the cached row height.
    pub fn invalidate_row_height(&self) {
        self.inner.borrow_mut().row_height = -1.0;
    }
}
