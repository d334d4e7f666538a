//! Error types for pasaje tables.
//!
//! Table processing itself never fails: malformed filter values and missing
//! fields are absorbed into "does not constrain" or "row excluded". The errors
//! below surface only at construction time (decoding rows, building pages,
//! validating configuration).

use thiserror::Error;

/// Errors that can occur while building table inputs.
#[derive(Debug, Error)]
pub enum TableError {
	/// Input data did not have the shape of a row (or a list of rows).
	#[error("Invalid row: {0}")]
	InvalidRow(String),

	/// Requested page number is not valid (pages are 1-indexed).
	#[error("Invalid page: {0}")]
	InvalidPage(usize),

	/// Page size must be at least one row.
	#[error("Invalid page size: {0}")]
	InvalidPageSize(usize),

	/// A table was configured inconsistently.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	/// The same field key was declared twice.
	#[error("Duplicate field: {0}")]
	DuplicateField(String),

	/// JSON decoding error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
