//! Per-table UI state
//!
//! The search query, active filters, sort and page of one table, passed into
//! the pipeline on every recomputation. Every mutator that can shrink the
//! result set sends the table back to page 1.

use crate::filtering::{ActiveFilters, FilterValue};
use crate::sorting::{SortDirection, SortState};
use pasaje_core::{Result, TableError};
use serde::{Deserialize, Serialize};

/// Default rows per page
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Search, filter, sort and pagination state of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableState {
	/// Free-text search query
	pub query: String,
	/// Active filters
	pub filters: ActiveFilters,
	/// Current sort
	pub sort: SortState,
	/// Current page (1-indexed)
	pub current_page: usize,
	/// Rows per page
	pub rows_per_page: usize,
}

impl Default for TableState {
	fn default() -> Self {
		Self {
			query: String::new(),
			filters: ActiveFilters::new(),
			sort: SortState::unsorted(),
			current_page: 1,
			rows_per_page: DEFAULT_ROWS_PER_PAGE,
		}
	}
}

impl TableState {
	/// Creates a state showing `rows_per_page` rows.
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidPageSize`] if `rows_per_page` is 0.
	pub fn new(rows_per_page: usize) -> Result<Self> {
		if rows_per_page == 0 {
			return Err(TableError::InvalidPageSize(rows_per_page));
		}
		Ok(Self {
			rows_per_page,
			..Self::default()
		})
	}

	/// Replaces the search query and returns to page 1
	pub fn set_query(&mut self, query: impl Into<String>) {
		self.query = query.into();
		self.current_page = 1;
	}

	/// Sets a filter value (empty values clear it) and returns to page 1
	pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
		self.filters.set(key, value);
		self.current_page = 1;
	}

	/// Clears one filter and returns to page 1
	pub fn clear_filter(&mut self, key: &str) {
		self.filters.clear(key);
		self.current_page = 1;
	}

	/// Clears every filter and returns to page 1
	pub fn clear_filters(&mut self) {
		self.filters.clear_all();
		self.current_page = 1;
	}

	/// Signals that the underlying dataset was replaced
	pub fn dataset_changed(&mut self) {
		self.current_page = 1;
	}

	/// Handles a header click on `key` (see [`SortState::toggle`])
	pub fn toggle_sort(&mut self, key: &str) {
		self.sort.toggle(key);
	}

	/// Sorts on `key` in an explicit direction
	pub fn sort_by(&mut self, key: impl Into<String>, direction: SortDirection) {
		self.sort = SortState::by(key, direction);
	}

	/// Restores the original order
	pub fn clear_sort(&mut self) {
		self.sort.clear();
	}

	/// Changes the page size and returns to page 1.
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidPageSize`] if `rows_per_page` is 0; the
	/// state is left unchanged.
	pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
		if rows_per_page == 0 {
			return Err(TableError::InvalidPageSize(rows_per_page));
		}
		self.rows_per_page = rows_per_page;
		self.current_page = 1;
		Ok(())
	}

	/// Number of pages needed for `total_rows` rows
	pub fn total_pages(&self, total_rows: usize) -> usize {
		if self.rows_per_page == 0 {
			0
		} else {
			total_rows.div_ceil(self.rows_per_page)
		}
	}

	/// Jumps to `page`, clamped to `[1, total_pages]`
	pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
		self.current_page = page.clamp(1, total_pages.max(1));
	}

	/// Advances one page if possible
	pub fn next_page(&mut self, total_pages: usize) -> bool {
		if self.current_page < total_pages {
			self.current_page += 1;
			true
		} else {
			false
		}
	}

	/// Goes back one page if possible
	pub fn previous_page(&mut self) -> bool {
		if self.current_page > 1 {
			self.current_page -= 1;
			true
		} else {
			false
		}
	}

	/// Resets a current page that no longer exists to page 1.
	///
	/// Returns true if the page was corrected.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_tables::state::TableState;
	///
	/// let mut state = TableState::default();
	/// state.current_page = 7;
	/// assert!(state.correct_page(3));
	/// assert_eq!(state.current_page, 1);
	/// assert!(!state.correct_page(3));
	/// ```
	pub fn correct_page(&mut self, total_pages: usize) -> bool {
		if self.current_page == 0 || self.current_page > total_pages.max(1) {
			self.current_page = 1;
			true
		} else {
			false
		}
	}

	/// Returns true if a search query or any filter is active
	pub fn is_narrowed(&self) -> bool {
		!self.query.trim().is_empty() || !self.filters.is_empty()
	}
}
