//! Filtering functionality for tables
//!
//! - [`FilterDescriptor`]: what a filter panel control constrains and how
//! - [`ActiveFilters`] / [`FilterValue`]: what the user has currently entered
//! - [`FilterEvaluator`]: decides which rows survive, with per-key overrides

pub mod active;
pub mod descriptor;
pub mod evaluator;

pub use active::{ActiveFilters, DateRange, FilterValue, NumericRange};
pub use descriptor::{FilterDescriptor, FilterOption, FilterType};
pub use evaluator::{FilterEvaluator, FilterPredicate, value_matches};

/// Trait for filterable tables
pub trait Filterable {
	/// Applies a filter to the table
	fn filter_by(&mut self, field: &str, value: &str);

	/// Clears all filters
	fn clear_filters(&mut self);

	/// Returns the current filters
	fn current_filters(&self) -> Vec<(&str, &FilterValue)>;
}
