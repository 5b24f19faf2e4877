//! Deterministic fakes for exercising kea's lazy machinery.
//!
//! Everything here is single-threaded and script-driven, mirroring the
//! cooperative model of a GUI main loop:
//!
//! - [`VecRowSource`] - in-memory result set with named orderings, a
//!   log of every physical slice fetched, and a failure switch
//! - [`TestListView`] - viewport whose visible range and sort state
//!   the test script sets directly
//! - [`ManualTimers`] - timer host driven by an explicit virtual clock

mod manual_timers;
mod test_view;
mod vec_source;

pub use manual_timers::ManualTimers;
pub use test_view::TestListView;
pub use vec_source::{FetchError, VecRowSource};
