//! Data table
//!
//! [`DataTable`] owns a dataset, its [`TableEngine`] and its [`TableState`],
//! and is what a list view (buses, localities, users, tickets) drives from
//! user events.

use crate::filtering::{FilterOption, FilterValue, Filterable};
use crate::pipeline::{TableEngine, TableView};
use crate::sorting::{SortDirection, Sortable};
use crate::state::TableState;
use pasaje_core::{Record, Result, TableError};

/// A dataset together with its processing configuration and UI state
///
/// # Examples
///
/// ```
/// use pasaje_core::Row;
/// use pasaje_tables::pipeline::TableEngine;
/// use pasaje_tables::table::DataTable;
///
/// let rows: Vec<Row> = (1..=12).map(|i| Row::new().with("id", i)).collect();
/// let mut table = DataTable::with_rows(TableEngine::new(), rows);
/// table.set_rows_per_page(5).unwrap();
///
/// table.next_page();
/// table.next_page();
/// let view = table.view().unwrap();
/// assert_eq!(view.current_page, 3);
/// assert_eq!(view.rows.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DataTable<R> {
	rows: Vec<R>,
	engine: TableEngine<R>,
	state: TableState,
}

impl<R> DataTable<R> {
	/// Creates an empty table
	pub fn new(engine: TableEngine<R>) -> Self {
		Self::with_rows(engine, Vec::new())
	}

	/// Creates a table over `rows`
	pub fn with_rows(engine: TableEngine<R>, rows: Vec<R>) -> Self {
		Self {
			rows,
			engine,
			state: TableState::default(),
		}
	}

	/// Replaces the initial state
	pub fn with_state(mut self, state: TableState) -> Self {
		self.state = state;
		self
	}

	/// Returns the unprocessed rows
	pub fn rows(&self) -> &[R] {
		&self.rows
	}

	/// Size of the unprocessed dataset
	pub fn total_rows(&self) -> usize {
		self.rows.len()
	}

	/// Replaces the dataset (for example after a re-fetch) and returns to page 1
	pub fn set_rows(&mut self, rows: Vec<R>) {
		self.rows = rows;
		self.state.dataset_changed();
	}

	/// Returns the engine
	pub fn engine(&self) -> &TableEngine<R> {
		&self.engine
	}

	/// Returns the current state
	pub fn state(&self) -> &TableState {
		&self.state
	}

	/// Replaces the search query
	pub fn set_query(&mut self, query: impl Into<String>) {
		self.state.set_query(query);
	}

	/// Sets a filter value; an empty value clears it.
	///
	/// Filters on columns declared not filterable are ignored.
	pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
		let key = key.into();
		if self.is_filterable(&key) {
			self.state.set_filter(key, value);
		} else {
			tracing::warn!(field = %key, "ignoring filter on a column that is not filterable");
		}
	}

	/// Clears one filter
	pub fn clear_filter(&mut self, key: &str) {
		self.state.clear_filter(key);
	}

	/// Changes the page size.
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidPageSize`] if `rows_per_page` is 0.
	pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
		self.state.set_rows_per_page(rows_per_page)
	}

	/// Returns true if the table can be sorted on `key`.
	///
	/// Tables without declared columns accept any key.
	pub fn is_sortable(&self, key: &str) -> bool {
		let columns = self.engine.columns();
		columns.is_empty() || columns.iter().any(|c| c.key == key && c.sortable)
	}

	/// Returns true if the table accepts a filter on `key`.
	///
	/// Keys that are not declared columns (for example a derived status)
	/// are always filterable.
	pub fn is_filterable(&self, key: &str) -> bool {
		self.engine
			.columns()
			.iter()
			.find(|c| c.key == key)
			.is_none_or(|c| c.filterable)
	}

	/// Handles a header click on `key`.
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidConfig`] if `key` is not a sortable column.
	pub fn toggle_sort(&mut self, key: &str) -> Result<()> {
		if !self.is_sortable(key) {
			return Err(TableError::InvalidConfig(format!(
				"column '{key}' is not sortable"
			)));
		}
		self.state.toggle_sort(key);
		Ok(())
	}
}

impl<R: Record> DataTable<R> {
	/// Number of pages for the current search and filters
	pub fn total_pages(&self) -> usize {
		let processed = self.engine.process_state(&self.rows, &self.state);
		self.state.total_pages(processed.total_filtered_count)
	}

	/// Jumps to `page`, clamped to the available pages
	pub fn go_to_page(&mut self, page: usize) {
		let total_pages = self.total_pages();
		self.state.go_to_page(page, total_pages);
	}

	/// Advances one page if possible
	pub fn next_page(&mut self) -> bool {
		let total_pages = self.total_pages();
		self.state.next_page(total_pages)
	}

	/// Goes back one page if possible
	pub fn previous_page(&mut self) -> bool {
		self.state.previous_page()
	}

	/// Renders the current page.
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidPageSize`] if the page size is 0.
	pub fn view(&self) -> Result<TableView<'_, R>> {
		self.engine.view(&self.rows, &self.state)
	}

	/// Options for the filter panel control of `key`: the declared options,
	/// or the distinct values of the dataset when none were declared
	pub fn filter_options(&self, key: &str) -> Vec<FilterOption> {
		if !self.is_filterable(key) {
			return Vec::new();
		}
		self.engine
			.filters()
			.descriptor(key)
			.map(|descriptor| descriptor.resolved_options(&self.rows))
			.unwrap_or_default()
	}
}

impl<R> Sortable for DataTable<R> {
	fn sort_by(&mut self, field: &str, direction: SortDirection) {
		if self.is_sortable(field) {
			self.state.sort_by(field, direction);
		} else {
			tracing::warn!(field, "ignoring sort on a column that is not sortable");
		}
	}

	fn current_sort(&self) -> Option<(&str, SortDirection)> {
		self.state
			.sort
			.key
			.as_deref()
			.map(|key| (key, self.state.sort.direction))
	}
}

impl<R> Filterable for DataTable<R> {
	fn filter_by(&mut self, field: &str, value: &str) {
		self.set_filter(field, value);
	}

	fn clear_filters(&mut self) {
		self.state.clear_filters();
	}

	fn current_filters(&self) -> Vec<(&str, &FilterValue)> {
		self.state.filters.active().collect()
	}
}
