//! Lazy data-binding foundation for list widgets.
//!
//! This crate holds the machinery that lets a list widget present a
//! database-backed result set of arbitrary size while only ever
//! fetching the rows the user is about to look at:
//!
//! - [`lazy::LazyRowStore`] - fixed-size, addressable row collection
//!   that materializes requested subranges on demand
//! - [`lazy::LazyListUpdater`] - debounced scroll observer that keeps
//!   the visible window (plus a margin) materialized
//! - [`lazy::DebounceGate`] / [`lazy::TimerHost`] - the latest-wins
//!   coalescing gate and the one-shot timer seam the host event loop
//!   implements
//! - [`lazy::LazySummary`] - numeric column summary readout
//! - [`ListView`] - the viewport surface a host toolkit adapter
//!   implements
//!
//! Everything is single-threaded and cooperative: fetches run on the UI
//! thread inside timer callbacks, which is acceptable because slices
//! are paged and fast. A stalled query freezes the UI; that is a known
//! limitation, not a handled error path.

pub mod lazy;
mod view;

pub use view::ListView;
