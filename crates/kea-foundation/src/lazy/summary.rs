//! Summary readout for numeric columns.

use kea_core::Column;

/// Running-total readout bound to a numeric column.
///
/// With a lazy model the total cannot be derived from the rows on
/// screen — most of them are not materialized — so the data layer
/// pushes the aggregate in whenever the full result is known.
pub struct LazySummary {
    column: Column,
    label: String,
    text: String,
}

impl LazySummary {
    /// Builds a summary with the default `Total:` label.
    ///
    /// # Panics
    ///
    /// Panics when `column` is not numeric; aggregating anything else
    /// is a programming error.
    pub fn new(column: Column) -> Self {
        Self::with_label(column, "Total:")
    }

    /// Builds a summary with a custom label.
    ///
    /// # Panics
    ///
    /// Panics when `column` is not numeric.
    pub fn with_label(column: Column, label: impl Into<String>) -> Self {
        assert!(
            column.data_type.is_number(),
            "data type of column {:?} must be a number, not {:?}",
            column.title,
            column.data_type
        );
        let label = label.into();
        Self {
            text: label.clone(),
            column,
            label,
        }
    }

    /// Replaces the displayed total.
    ///
    /// `None` means the aggregate is not known yet and keeps the
    /// current readout untouched.
    pub fn update_total(&mut self, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        self.text = format!("{} {}", self.label, value);
    }

    /// The rendered readout text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The column this summary aggregates.
    pub fn column(&self) -> &Column {
        &self.column
    }
}
