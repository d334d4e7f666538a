//! # Pasaje Tables
//!
//! Client-side data table engine for the pasaje list views (trips, buses,
//! localities, users, tickets): given a raw collection and declarative
//! search/filter/sort configuration, produce the exact page of rows to render.
//!
//! # Architecture
//!
//! ```text
//! rows ──► search ──► filters (AND) ──► stable sort ──► page slice
//!          SearchMatcher  FilterEvaluator   SmartComparator   pasaje-pagination
//! ```
//!
//! - [`filtering`]: filter descriptors, active values, predicate evaluation
//! - [`search`]: free-text matching over literal and derived fields
//! - [`sorting`]: per-field semantic comparison and sort state
//! - [`pipeline`]: the composed [`TableEngine`] and its [`TableView`] output
//! - [`state`]: [`TableState`], the query/filters/sort/page tuple
//! - [`table`]: [`DataTable`], a dataset bundled with engine and state
//!
//! # Example
//!
//! ```
//! use pasaje_core::{Record, Row};
//! use pasaje_tables::prelude::*;
//!
//! let users = vec![
//!     Row::new().with("nombre", "Juan").with("apellido", "Pérez").with("rol", "cliente"),
//!     Row::new().with("nombre", "Ana").with("apellido", "Mora").with("rol", "admin"),
//! ];
//!
//! let engine = TableEngine::new()
//!     .with_search_field(SearchField::derived("nombreCompleto", |row: &Row| {
//!         format!("{} {}", row.field_text("nombre"), row.field_text("apellido"))
//!     }))
//!     .with_filter(FilterDescriptor::select("rol", "Rol"));
//!
//! let mut table = DataTable::with_rows(engine, users);
//! table.set_query("juan");
//! let view = table.view().unwrap();
//! assert_eq!(view.total_filtered_count, 1);
//! ```

#![warn(missing_docs)]

pub mod column;
pub mod filtering;
pub mod pipeline;
pub mod search;
pub mod sorting;
pub mod state;
pub mod table;

pub use column::ColumnSpec;
pub use pipeline::{Processed, TableEngine, TableView};
pub use state::TableState;
pub use table::DataTable;

/// Commonly used table types
pub mod prelude {
	pub use crate::column::ColumnSpec;
	pub use crate::filtering::{
		ActiveFilters, FilterDescriptor, FilterEvaluator, FilterOption, FilterPredicate,
		FilterType, FilterValue, Filterable,
	};
	pub use crate::pipeline::{Processed, TableEngine, TableView};
	pub use crate::search::{SearchField, SearchMatcher, SearchOptions};
	pub use crate::sorting::{
		FieldKind, SmartComparator, SortDirection, SortState, Sortable, StatusRanking,
	};
	pub use crate::state::TableState;
	pub use crate::table::DataTable;
	pub use pasaje_pagination::PageItem;
}
