//! Table processing pipeline
//!
//! Search, then filter, then sort, over the full dataset; the caller then slices
//! the page it renders. Every stage is a pure function of its inputs and works
//! on borrowed rows, so the input collection is never mutated or copied.

use crate::column::ColumnSpec;
use crate::filtering::{ActiveFilters, FilterDescriptor, FilterEvaluator, FilterPredicate};
use crate::search::{SearchField, SearchMatcher, SearchOptions};
use crate::sorting::{SmartComparator, SortState, StatusRanking};
use crate::state::TableState;
use pasaje_core::{Record, Result};
use pasaje_pagination::{PageItem, page_range, paginate};
use std::fmt;

/// Default number of page buttons in the visible window
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// Output of [`TableEngine::process`]
pub struct Processed<'a, R> {
	/// Every row that survived search and filters, in display order
	pub rows: Vec<&'a R>,
	/// Number of surviving rows
	pub total_filtered_count: usize,
}

impl<R> fmt::Debug for Processed<'_, R>
where
	R: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Processed")
			.field("rows", &self.rows)
			.field("total_filtered_count", &self.total_filtered_count)
			.finish()
	}
}

/// Everything a table component needs to render one page
pub struct TableView<'a, R> {
	/// Rows of the current page
	pub rows: Vec<&'a R>,
	/// Size of the unprocessed dataset
	pub total_rows: usize,
	/// Rows left after search and filters
	pub total_filtered_count: usize,
	/// Pages needed for the filtered rows
	pub total_pages: usize,
	/// Page shown (already corrected if the state pointed past the end)
	pub current_page: usize,
	/// 1-based index of the first row shown, 0 when empty
	pub start_index: usize,
	/// 1-based index of the last row shown, 0 when empty
	pub end_index: usize,
	/// Pagination control items; empty when there is at most one page
	pub pages: Vec<PageItem>,
}

impl<R> TableView<'_, R> {
	/// Returns true if a pagination control should be rendered
	pub fn show_pagination(&self) -> bool {
		self.total_pages > 1
	}

	/// Returns true if nothing matched (as opposed to an empty dataset)
	pub fn no_matches(&self) -> bool {
		self.total_rows > 0 && self.total_filtered_count == 0
	}

	/// "Showing x-y of n" summary
	pub fn summary(&self) -> String {
		format!(
			"Mostrando {}-{} de {}",
			self.start_index, self.end_index, self.total_filtered_count
		)
	}
}

impl<R> fmt::Debug for TableView<'_, R>
where
	R: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableView")
			.field("rows", &self.rows)
			.field("total_rows", &self.total_rows)
			.field("total_filtered_count", &self.total_filtered_count)
			.field("total_pages", &self.total_pages)
			.field("current_page", &self.current_page)
			.field("pages", &self.pages)
			.finish()
	}
}

/// Search + filter + sort configuration of one table instance
///
/// # Examples
///
/// ```
/// use pasaje_core::Row;
/// use pasaje_tables::column::ColumnSpec;
/// use pasaje_tables::filtering::{ActiveFilters, FilterDescriptor};
/// use pasaje_tables::pipeline::TableEngine;
/// use pasaje_tables::sorting::{FieldKind, SortDirection, SortState};
///
/// let buses = vec![
///     Row::new().with("unidad", "12").with("capacidad", "30").with("estado", "Activo"),
///     Row::new().with("unidad", "7").with("capacidad", "5").with("estado", "Activo"),
///     Row::new().with("unidad", "3").with("capacidad", "100").with("estado", "Inactivo"),
/// ];
///
/// let engine = TableEngine::new()
///     .with_column(ColumnSpec::new("capacidad", "Capacidad").kind(FieldKind::Numeric))
///     .with_filter(FilterDescriptor::select("estado", "Estado"))
///     .searchable(["unidad"]);
///
/// let filters = ActiveFilters::new().with("estado", "Activo");
/// let sort = SortState::by("capacidad", SortDirection::Ascending);
/// let processed = engine.process(&buses, "", &filters, &sort);
///
/// assert_eq!(processed.total_filtered_count, 2);
/// assert_eq!(processed.rows[0].get("unidad"), buses[1].get("unidad"));
/// ```
pub struct TableEngine<R> {
	search: Option<SearchMatcher<R>>,
	filters: FilterEvaluator<R>,
	comparator: SmartComparator,
	columns: Vec<ColumnSpec>,
	max_visible_pages: usize,
}

impl<R> TableEngine<R> {
	/// Creates an engine with search disabled, no filters and no columns
	pub fn new() -> Self {
		Self {
			search: None,
			filters: FilterEvaluator::new(),
			comparator: SmartComparator::new(),
			columns: Vec::new(),
			max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
		}
	}

	/// Enables search with the given matcher
	pub fn with_search(mut self, matcher: SearchMatcher<R>) -> Self {
		self.search = Some(matcher);
		self
	}

	/// Enables search over literal field keys
	pub fn searchable<I, S>(self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.with_search(SearchMatcher::literal(keys))
	}

	/// Adds a searchable field, enabling search if needed
	pub fn with_search_field(mut self, field: SearchField<R>) -> Self {
		let matcher = self.search.take().unwrap_or_else(|| SearchMatcher::new(Vec::new()));
		self.search = Some(matcher.with_field(field));
		self
	}

	/// Sets search options, enabling search if needed
	pub fn with_search_options(mut self, options: SearchOptions) -> Self {
		let matcher = self.search.take().unwrap_or_else(|| SearchMatcher::new(Vec::new()));
		self.search = Some(matcher.with_options(options));
		self
	}

	/// Adds a column; its kind drives sorting on its key
	pub fn with_column(mut self, column: ColumnSpec) -> Self {
		self.comparator = self.comparator.with_kind(column.key.clone(), column.kind);
		self.columns.push(column);
		self
	}

	/// Adds a filter descriptor
	pub fn with_filter(mut self, descriptor: FilterDescriptor) -> Self {
		self.filters.add_descriptor(descriptor);
		self
	}

	/// Registers a per-key filter override
	pub fn with_filter_override(
		mut self,
		key: impl Into<String>,
		predicate: impl FilterPredicate<R> + 'static,
	) -> Self {
		self.filters = self.filters.with_override(key, predicate);
		self
	}

	/// Replaces the status ranking used by status columns
	pub fn with_status_ranking(mut self, ranking: StatusRanking) -> Self {
		self.comparator = self.comparator.with_ranking(ranking);
		self
	}

	/// Sets the number of page buttons in the visible window
	pub fn with_max_visible_pages(mut self, max_visible_pages: usize) -> Self {
		self.max_visible_pages = max_visible_pages;
		self
	}

	/// Returns the search matcher, if search is enabled
	pub fn search(&self) -> Option<&SearchMatcher<R>> {
		self.search.as_ref()
	}

	/// Returns the filter evaluator
	pub fn filters(&self) -> &FilterEvaluator<R> {
		&self.filters
	}

	/// Returns the comparator
	pub fn comparator(&self) -> &SmartComparator {
		&self.comparator
	}

	/// Returns the columns in declaration order
	pub fn columns(&self) -> &[ColumnSpec] {
		&self.columns
	}

	/// Returns the visible page window size
	pub fn max_visible_pages(&self) -> usize {
		self.max_visible_pages
	}
}

impl<R: Record> TableEngine<R> {
	/// Runs search, filters and sort over `rows`.
	///
	/// Search runs only if enabled, filters combine as a conjunction, and rows
	/// are reordered only if a sort key is active (stably, so ties keep their
	/// post-filter order). Identical inputs always produce identical output.
	pub fn process<'a>(
		&self,
		rows: &'a [R],
		query: &str,
		filters: &ActiveFilters,
		sort: &SortState,
	) -> Processed<'a, R> {
		let mut current: Vec<&'a R> = rows.iter().collect();

		if let Some(matcher) = &self.search {
			current = matcher.search(current, query);
		}
		let searched = current.len();

		current = self.filters.apply(current, filters);
		let filtered = current.len();

		self.comparator.sort(&mut current, sort);

		tracing::debug!(
			total = rows.len(),
			searched,
			filtered,
			sort_key = sort.key.as_deref().unwrap_or(""),
			"processed table rows"
		);

		Processed {
			total_filtered_count: current.len(),
			rows: current,
		}
	}

	/// [`process`](Self::process) with the inputs taken from `state`
	pub fn process_state<'a>(&self, rows: &'a [R], state: &TableState) -> Processed<'a, R> {
		self.process(rows, &state.query, &state.filters, &state.sort)
	}

	/// Processes `rows` and slices the page `state` points at.
	///
	/// A current page past the end of the filtered rows is shown as page 1;
	/// `state` itself is not modified (see [`TableState::correct_page`]).
	///
	/// # Errors
	///
	/// Returns [`pasaje_core::TableError::InvalidPageSize`] if the state's
	/// page size is 0.
	pub fn view<'a>(&self, rows: &'a [R], state: &TableState) -> Result<TableView<'a, R>> {
		let processed = self.process_state(rows, state);
		let total_filtered_count = processed.total_filtered_count;

		let mut corrected = state.clone();
		let total_pages = corrected.total_pages(total_filtered_count);
		if corrected.correct_page(total_pages) {
			tracing::debug!(
				requested = state.current_page,
				total_pages,
				"current page out of range, showing page 1"
			);
		}

		let page = paginate(processed.rows, corrected.current_page, corrected.rows_per_page)?;
		let pages = if total_pages > 1 {
			page_range(page.number, total_pages, self.max_visible_pages)
		} else {
			Vec::new()
		};

		Ok(TableView {
			start_index: page.start_index(),
			end_index: page.end_index(),
			current_page: page.number,
			rows: page.object_list,
			total_rows: rows.len(),
			total_filtered_count,
			total_pages,
			pages,
		})
	}
}

impl<R> Default for TableEngine<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> Clone for TableEngine<R> {
	fn clone(&self) -> Self {
		Self {
			search: self.search.clone(),
			filters: self.filters.clone(),
			comparator: self.comparator.clone(),
			columns: self.columns.clone(),
			max_visible_pages: self.max_visible_pages,
		}
	}
}

impl<R> fmt::Debug for TableEngine<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TableEngine")
			.field("search", &self.search)
			.field("filters", &self.filters)
			.field("comparator", &self.comparator)
			.field("columns", &self.columns)
			.field("max_visible_pages", &self.max_visible_pages)
			.finish()
	}
}
