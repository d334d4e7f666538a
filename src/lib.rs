//! # Pasaje
//!
//! Client-side data table engine for the pasaje bus-ticketing frontend.
//!
//! Every list view of the application (trips, buses, localities, users,
//! tickets, discounts) holds a raw collection of records fetched from the
//! backend and shows one page of it, narrowed by a free-text search and a
//! panel of typed filters, ordered by a clicked column. This crate is that
//! pipeline, independent of any UI framework.
//!
//! ## Crates
//!
//! - [`core`] (`pasaje-core`): [`Row`](core::Row), [`Value`](core::Value), the
//!   [`Record`](core::Record) field-access trait and [`TableError`](core::TableError)
//! - [`pagination`] (`pasaje-pagination`): page slicing and page-range items
//! - [`tables`] (`pasaje-tables`): search, filters, sorting, table state and
//!   the composed [`TableEngine`](tables::TableEngine)
//! - [`conf`] (`pasaje-conf`, feature `conf`): TOML/JSON table settings with
//!   environment overrides, and logging setup
//!
//! ## Feature Flags
//!
//! - `conf` (default): declarative settings and `tracing-subscriber` setup
//!
//! ## Quick Example
//!
//! ```
//! use pasaje::prelude::*;
//!
//! let buses = vec![
//!     Row::new().with("unidad", "Bus 12").with("capacidad", "30").with("estado_texto", "Activo"),
//!     Row::new().with("unidad", "Bus 3").with("capacidad", "5").with("estado_texto", "Inactivo"),
//!     Row::new().with("unidad", "Bus 40").with("capacidad", "100").with("estado_texto", "Activo"),
//! ];
//!
//! let engine = TableEngine::new()
//!     .with_column(ColumnSpec::new("capacidad", "Capacidad").kind(FieldKind::Numeric))
//!     .with_column(ColumnSpec::new("estado_texto", "Estado").kind(FieldKind::Status))
//!     .with_filter(FilterDescriptor::select("estado_texto", "Estado"))
//!     .searchable(["unidad"]);
//!
//! let mut table = DataTable::with_rows(engine, buses);
//! table.set_filter("estado_texto", "Activo");
//! table.toggle_sort("capacidad").unwrap();
//!
//! let view = table.view().unwrap();
//! let capacities: Vec<String> = view.rows.iter().map(|r| r.field_text("capacidad")).collect();
//! assert_eq!(capacities, vec!["30", "100"]);
//! assert_eq!(view.summary(), "Mostrando 1-2 de 2");
//! ```

pub mod core;
pub mod pagination;
pub mod tables;

#[cfg(feature = "conf")]
pub mod conf;

/// Everything a list view needs in one import
pub mod prelude {
	pub use pasaje_core::{Record, Row, TableError, Value, rows_from_json};
	pub use pasaje_pagination::{Page, PageItem, page_range, paginate};
	pub use pasaje_tables::prelude::*;

	#[cfg(feature = "conf")]
	pub use pasaje_conf::{ConfError, LoggingSettings, TableSettings};
}
