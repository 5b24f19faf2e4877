//! Data contracts for kea's lazy data-backed list widgets.
//!
//! This crate defines the narrow seams between a host GUI toolkit, a
//! data layer, and the lazy machinery in `kea-foundation`:
//!
//! - [`RowSource`] - a countable, sliceable, re-orderable result set
//! - [`TableModel`] - random access over a lazily populated row
//!   collection
//! - [`SortableModel`] - sort control over a re-orderable model
//! - [`Column`] - column descriptor mapping a widget column to a source
//!   attribute and a [`DataType`] classifier
//!
//! Nothing in here renders or fetches; these are the types both sides
//! agree on.

mod column;
mod model;
mod source;

pub use column::{Column, DataType, SortOrder};
pub use model::{RowIter, RowPath, SortableModel, TableModel};
pub use source::RowSource;
