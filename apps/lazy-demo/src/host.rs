//! Console host adapter: a cooperative timer loop and a simulated
//! viewport, standing in for a real toolkit's main loop and tree view.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use kea_core::{SortOrder, TableModel};
use kea_foundation::lazy::TimerHost;
use kea_foundation::ListView;
use web_time::Instant;

struct PendingTimer {
    fire_at: Instant,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

/// Minimal single-threaded event loop: one-shot timers in a queue,
/// drained in deadline order, sleeping through the gaps.
#[derive(Default)]
pub struct MainLoop {
    queue: RefCell<Vec<PendingTimer>>,
    next_seq: Cell<u64>,
}

impl MainLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs timers until the queue drains.
    pub fn run_until_idle(&self) {
        loop {
            let due = {
                let mut queue = self.queue.borrow_mut();
                let next = queue
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, timer)| (timer.fire_at, timer.seq))
                    .map(|(index, _)| index);
                next.map(|index| queue.remove(index))
            };
            let Some(timer) = due else {
                break;
            };
            let now = Instant::now();
            if timer.fire_at > now {
                thread::sleep(timer.fire_at - now);
            }
            (timer.callback)();
        }
    }
}

impl TimerHost for MainLoop {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(PendingTimer {
            fire_at: Instant::now() + delay,
            seq,
            callback,
        });
    }
}

/// A text-mode "tree view": a fixed-size page over the model, scrolled
/// by row offset.
pub struct ConsoleView<T> {
    model: RefCell<Option<Rc<dyn TableModel<Row = T>>>>,
    offset: Cell<usize>,
    page_rows: usize,
    sort_state: Cell<(Option<usize>, SortOrder)>,
    selection_refreshes: Cell<usize>,
}

impl<T> ConsoleView<T> {
    pub fn new(page_rows: usize) -> Self {
        Self {
            model: RefCell::new(None),
            offset: Cell::new(0),
            page_rows,
            sort_state: Cell::new((None, SortOrder::Ascending)),
            selection_refreshes: Cell::new(0),
        }
    }

    /// Moves the viewport to `offset`, as a scrollbar drag would.
    pub fn scroll_to(&self, offset: usize) {
        self.offset.set(offset);
    }

    pub fn set_sort_state(&self, column: Option<usize>, order: SortOrder) {
        self.sort_state.set((column, order));
    }

    /// Renders the visible page; unloaded slots show as placeholders.
    pub fn render(&self, describe: impl Fn(&T) -> String) {
        let model = self.model.borrow();
        let Some(model) = model.as_ref() else {
            println!("(no model)");
            return;
        };
        for index in self.visible_range() {
            match model.get(index) {
                Some(row) => println!("{index:>6}  {}", describe(&row)),
                None => println!("{index:>6}  ..."),
            }
        }
    }
}

impl<T> ListView for ConsoleView<T> {
    type Row = T;

    fn model(&self) -> Option<Rc<dyn TableModel<Row = T>>> {
        self.model.borrow().clone()
    }

    fn set_model(&self, model: Option<Rc<dyn TableModel<Row = T>>>) {
        *self.model.borrow_mut() = model;
    }

    fn visible_range(&self) -> Range<usize> {
        let total = self
            .model
            .borrow()
            .as_ref()
            .map(|model| model.len())
            .unwrap_or(0);
        let start = self.offset.get().min(total);
        let end = (start + self.page_rows).min(total);
        start..end
    }

    fn scroll_to_origin(&self) {
        self.offset.set(0);
    }

    fn refresh_selection(&self) {
        self.selection_refreshes
            .set(self.selection_refreshes.get() + 1);
        log::debug!("selection refreshed after new rows appeared");
    }

    fn measure_row_height(&self) -> f32 {
        // One text line per row.
        1.0
    }

    fn sort_state(&self) -> (Option<usize>, SortOrder) {
        self.sort_state.get()
    }
}
