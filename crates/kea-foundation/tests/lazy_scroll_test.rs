//! End-to-end exercise of the lazy list flow: attach a result set,
//! scroll through it in bursts, flip the sort order, detach.

use std::rc::Rc;
use std::time::Duration;

use kea_core::{Column, DataType, SortOrder, SortableModel, TableModel};
use kea_foundation::lazy::{LazyListUpdater, UpdaterConfig};
use kea_foundation::ListView;
use kea_testing::{ManualTimers, TestListView, VecRowSource};

const DEBOUNCE: Duration = Duration::from_millis(10);
const SETTLE: Duration = Duration::from_millis(50);

fn columns() -> Rc<[Column]> {
    vec![
        Column::new("Name").attribute("name").data_type(DataType::Str),
        Column::new("Size").attribute("size").data_type(DataType::Int),
    ]
    .into()
}

fn source(count: usize) -> VecRowSource<(String, i64)> {
    let rows = (0..count)
        .map(|i| (format!("row-{i:04}"), (count - i) as i64))
        .collect();
    VecRowSource::new(rows)
        .with_ordering("name", |a: &(String, i64), b: &(String, i64)| a.0.cmp(&b.0))
        .with_ordering("size", |a: &(String, i64), b: &(String, i64)| a.1.cmp(&b.1))
}

#[test]
fn test_scroll_session_materializes_only_what_was_visited() {
    let source = source(1000);
    let view = Rc::new(TestListView::new());
    let timers = Rc::new(ManualTimers::new());
    let updater = LazyListUpdater::with_config(
        Rc::clone(&view),
        columns(),
        timers.clone(),
        UpdaterConfig::new()
            .initial_rows(50)
            .extra_rows(30)
            .scroll_debounce(DEBOUNCE),
    );

    updater.attach(source.clone()).unwrap();
    let store = updater.store().unwrap();
    assert_eq!(store.materialized_count(), 50);

    // A burst of scroll positions on the way to rows 300..320; only
    // the resting position loads.
    source.clear_fetches();
    for start in [80usize, 150, 230, 300] {
        view.set_visible_range(start..start + 20);
        updater.on_scroll_changed();
        timers.advance(Duration::from_millis(2));
    }
    timers.advance(SETTLE);
    assert_eq!(source.fetches(), vec![270..350]);
    assert_eq!(store.materialized_count(), 50 + 80);
    assert_eq!(view.selection_refreshes(), 1);

    // Scrolling within loaded ground fetches nothing new.
    view.set_visible_range(305..315);
    updater.on_scroll_changed();
    timers.advance(SETTLE);
    assert_eq!(source.fetches(), vec![270..350]);
    assert_eq!(view.selection_refreshes(), 1);
}

#[test]
fn test_sort_flip_resets_store_and_viewport() {
    let source = source(500);
    let view = Rc::new(TestListView::new());
    let timers = Rc::new(ManualTimers::new());
    let updater = LazyListUpdater::with_config(
        Rc::clone(&view),
        columns(),
        timers.clone(),
        UpdaterConfig::new()
            .initial_rows(20)
            .extra_rows(10)
            .scroll_debounce(DEBOUNCE),
    );
    updater.attach(source.clone()).unwrap();
    let store = updater.store().unwrap();

    // Wander deep into the list first.
    view.set_visible_range(400..420);
    updater.on_scroll_changed();
    timers.advance(SETTLE);
    assert!(store.materialized_count() > 20);

    // Sort by size descending: logical row 0 becomes the largest size,
    // which the synthetic data puts at the front of the original rows.
    store.set_sort_column(1, SortOrder::Descending).unwrap();
    updater.on_sorting_changed("size", SortOrder::Descending);

    assert_eq!(view.scrolls_to_origin(), 1);
    assert_eq!(view.visible_range(), 0..20);
    assert_eq!(store.materialized_count(), 20);
    let model = view.model().unwrap();
    assert_eq!(model.get(0), Some(("row-0000".to_string(), 500)));
    assert_eq!(model.get(19), Some(("row-0019".to_string(), 481)));
    assert_eq!(model.get(20), None);
}

#[test]
fn test_detach_ends_the_session_cleanly() {
    let source = source(100);
    let view = Rc::new(TestListView::new());
    let timers = Rc::new(ManualTimers::new());
    let updater = LazyListUpdater::with_config(
        Rc::clone(&view),
        columns(),
        timers.clone(),
        UpdaterConfig::new()
            .initial_rows(10)
            .extra_rows(5)
            .scroll_debounce(DEBOUNCE),
    );
    updater.attach(source.clone()).unwrap();
    assert!(view.model().is_some());

    // Leave a timer in flight, then tear down.
    view.set_visible_range(40..50);
    updater.on_scroll_changed();
    updater.detach();

    assert!(view.model().is_none());
    assert!(updater.store().is_none());
    source.clear_fetches();
    timers.advance(SETTLE);
    assert!(source.fetches().is_empty());

    // Detaching twice is harmless.
    updater.detach();
}
