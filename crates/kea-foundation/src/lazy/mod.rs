//! Lazy loading for data-backed list widgets.
//!
//! The two halves of the system:
//! - [`LazyRowStore`] - adapts a paged query result into an
//!   addressable, partially populated row collection exposed as a
//!   random-access table model
//! - [`LazyListUpdater`] - observes scroll position, debounces bursts,
//!   and triggers incremental loads ahead of and behind the visible
//!   window
//!
//! Both are single-threaded; the host GUI event loop drives the timer
//! callbacks through the [`TimerHost`] seam.

mod debounce;
mod row_store;
mod summary;
mod updater;

pub use debounce::*;
pub use row_store::*;
pub use summary::*;
pub use updater::*;
