//! Column definitions
//!
//! A column ties a row field to its header text and declares how it takes part
//! in sorting and filtering.

use crate::sorting::FieldKind;
use pasaje_core::Record;
use serde::{Deserialize, Serialize};

/// Declarative column of a data table
///
/// # Examples
///
/// ```
/// use pasaje_core::Row;
/// use pasaje_tables::column::ColumnSpec;
/// use pasaje_tables::sorting::FieldKind;
///
/// let capacidad = ColumnSpec::new("capacidad", "Capacidad").kind(FieldKind::Numeric);
/// let row = Row::new().with("capacidad", 42);
/// assert_eq!(capacidad.render(&row), "42");
/// assert!(capacidad.sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
	/// Row field shown in this column; also the sort key
	pub key: String,
	/// Header text
	#[serde(default)]
	pub header: String,
	/// Comparison class used when sorting on this column
	#[serde(default)]
	pub kind: FieldKind,
	/// Whether clicking the header sorts the table
	#[serde(default = "default_true")]
	pub sortable: bool,
	/// Whether the column is offered in the filter panel
	#[serde(default = "default_true")]
	pub filterable: bool,
}

fn default_true() -> bool {
	true
}

impl ColumnSpec {
	/// Creates a sortable, filterable lexicographic column
	pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			header: header.into(),
			kind: FieldKind::Lexicographic,
			sortable: true,
			filterable: true,
		}
	}

	/// Sets the comparison class
	pub fn kind(mut self, kind: FieldKind) -> Self {
		self.kind = kind;
		self
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether this column is filterable
	pub fn filterable(mut self, filterable: bool) -> Self {
		self.filterable = filterable;
		self
	}

	/// Renders the cell of `row` for this column
	pub fn render<R: Record>(&self, row: &R) -> String {
		row.field_text(&self.key)
	}
}
