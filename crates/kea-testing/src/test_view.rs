//! Scripted viewport for updater tests.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;

use kea_core::{SortOrder, TableModel};
use kea_foundation::ListView;

/// A [`ListView`] whose viewport is driven by the test script.
///
/// Visible range, sort indicator, and row-height metric are plain
/// settable state; the view counts how often the updater scrolls it to
/// the origin, refreshes its selection, or measures a row.
pub struct TestListView<T> {
    model: RefCell<Option<Rc<dyn TableModel<Row = T>>>>,
    visible: RefCell<Range<usize>>,
    sort_state: Cell<(Option<usize>, SortOrder)>,
    row_height: Cell<f32>,
    measure_calls: Cell<usize>,
    scrolls_to_origin: Cell<usize>,
    selection_refreshes: Cell<usize>,
}

impl<T> Default for TestListView<T> {
    fn default() -> Self {
        Self {
            model: RefCell::new(None),
            visible: RefCell::new(0..0),
            sort_state: Cell::new((None, SortOrder::Ascending)),
            row_height: Cell::new(24.0),
            measure_calls: Cell::new(0),
            scrolls_to_origin: Cell::new(0),
            selection_refreshes: Cell::new(0),
        }
    }
}

impl<T> TestListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_visible_range(&self, range: Range<usize>) {
        *self.visible.borrow_mut() = range;
    }

    pub fn set_sort_state(&self, column: Option<usize>, order: SortOrder) {
        self.sort_state.set((column, order));
    }

    pub fn set_row_height(&self, height: f32) {
        self.row_height.set(height);
    }

    pub fn measure_calls(&self) -> usize {
        self.measure_calls.get()
    }

    pub fn scrolls_to_origin(&self) -> usize {
        self.scrolls_to_origin.get()
    }

    pub fn selection_refreshes(&self) -> usize {
        self.selection_refreshes.get()
    }
}

impl<T> ListView for TestListView<T> {
    type Row = T;

    fn model(&self) -> Option<Rc<dyn TableModel<Row = T>>> {
        self.model.borrow().clone()
    }

    fn set_model(&self, model: Option<Rc<dyn TableModel<Row = T>>>) {
        *self.model.borrow_mut() = model;
    }

    fn visible_range(&self) -> Range<usize> {
        self.visible.borrow().clone()
    }

    fn scroll_to_origin(&self) {
        self.scrolls_to_origin.set(self.scrolls_to_origin.get() + 1);
        // Keep the page size, move it to the front.
        let len = self.visible.borrow().len();
        *self.visible.borrow_mut() = 0..len;
    }

    fn refresh_selection(&self) {
        self.selection_refreshes
            .set(self.selection_refreshes.get() + 1);
    }

    fn measure_row_height(&self) -> f32 {
        self.measure_calls.set(self.measure_calls.get() + 1);
        self.row_height.get()
    }

    fn sort_state(&self) -> (Option<usize>, SortOrder) {
        self.sort_state.get()
    }
}
