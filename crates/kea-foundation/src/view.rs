//! The viewport collaborator trait.

use std::ops::Range;
use std::rc::Rc;

use kea_core::{SortOrder, TableModel};

/// The widget-toolkit surface a lazy list updater drives.
///
/// Implemented once per host toolkit by a thin adapter. Signal wiring is
/// inverted compared to a toolkit's connect API: the adapter forwards
/// its scroll-position and sorting-changed notifications by calling the
/// updater's `on_scroll_changed` / `on_sorting_changed`, and the updater
/// drives the view back through this trait.
pub trait ListView {
    /// Row object of the models this view displays.
    type Row;

    /// Currently installed model, if any.
    fn model(&self) -> Option<Rc<dyn TableModel<Row = Self::Row>>>;

    /// Installs (or clears) the current model.
    fn set_model(&self, model: Option<Rc<dyn TableModel<Row = Self::Row>>>);

    /// Index range of the rows currently visible in the viewport.
    fn visible_range(&self) -> Range<usize>;

    /// Scrolls the viewport back to the first row.
    fn scroll_to_origin(&self);

    /// Re-applies selection state.
    ///
    /// Called after new rows were materialized; selection tracking can
    /// be invalidated by rows that just appeared.
    fn refresh_selection(&self);

    /// Pixel height of a single rendered row.
    ///
    /// May be expensive; callers cache the result and ask at most once
    /// per cache generation.
    fn measure_row_height(&self) -> f32;

    /// The sort indicator the view currently shows.
    ///
    /// Used to seed a freshly attached model with the ordering the
    /// result set already has.
    fn sort_state(&self) -> (Option<usize>, SortOrder);
}
