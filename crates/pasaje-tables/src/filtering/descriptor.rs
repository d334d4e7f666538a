//! Filter descriptors
//!
//! A descriptor declares which field a filter panel control constrains and how
//! the active value is interpreted.

use pasaje_core::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How an active filter value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
	/// Case-insensitive substring match
	#[default]
	Text,
	/// Exact (trimmed) equality against one of the declared options
	Select,
	/// Numeric `{min, max}` bounds
	Range,
	/// Single calendar day (`YYYY-MM-DD`), or a `{from, to}` date range
	Date,
	/// `HH:MM` equality
	Time,
}

/// One choice of a select filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
	/// Value compared against the row field
	pub value: String,
	/// Text shown in the filter panel
	pub label: String,
}

impl FilterOption {
	/// Creates a new option
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}
}

/// Declarative description of a filter control
///
/// # Examples
///
/// ```
/// use pasaje_tables::filtering::{FilterDescriptor, FilterType};
///
/// let estado = FilterDescriptor::select("estado_texto", "Estado")
///     .option("Activo", "Activo")
///     .option("Inactivo", "Inactivo");
///
/// assert_eq!(estado.filter_type, FilterType::Select);
/// assert_eq!(estado.options.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
	/// Row field the filter constrains
	pub key: String,
	/// Label shown in the filter panel
	#[serde(default)]
	pub label: String,
	/// Interpretation of the active value
	#[serde(rename = "type", default)]
	pub filter_type: FilterType,
	/// Choices for select filters
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<FilterOption>,
}

impl FilterDescriptor {
	/// Creates a descriptor of the given type
	pub fn new(key: impl Into<String>, label: impl Into<String>, filter_type: FilterType) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			filter_type,
			options: Vec::new(),
		}
	}

	/// Creates a text filter
	pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(key, label, FilterType::Text)
	}

	/// Creates a select filter
	pub fn select(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(key, label, FilterType::Select)
	}

	/// Creates a numeric range filter
	pub fn range(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(key, label, FilterType::Range)
	}

	/// Creates a date filter
	pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(key, label, FilterType::Date)
	}

	/// Creates a time filter
	pub fn time(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(key, label, FilterType::Time)
	}

	/// Adds a select option
	pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.options.push(FilterOption::new(value, label));
		self
	}

	/// Derives select options from the distinct non-empty values of this
	/// descriptor's field, sorted and labelled with the value itself.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_core::Row;
	/// use pasaje_tables::filtering::FilterDescriptor;
	///
	/// let rows = vec![
	///     Row::new().with("origen", "Quito"),
	///     Row::new().with("origen", "Cuenca"),
	///     Row::new().with("origen", "Quito"),
	///     Row::new(),
	/// ];
	/// let options = FilterDescriptor::select("origen", "Origen").options_from_rows(&rows);
	/// let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
	/// assert_eq!(values, vec!["Cuenca", "Quito"]);
	/// ```
	pub fn options_from_rows<R: Record>(&self, rows: &[R]) -> Vec<FilterOption> {
		rows.iter()
			.map(|row| row.field_text(&self.key).trim().to_string())
			.filter(|value| !value.is_empty())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.map(|value| FilterOption::new(value.clone(), value))
			.collect()
	}

	/// Returns the declared options, or options derived from `rows` when none
	/// were declared
	pub fn resolved_options<R: Record>(&self, rows: &[R]) -> Vec<FilterOption> {
		if self.options.is_empty() {
			self.options_from_rows(rows)
		} else {
			self.options.clone()
		}
	}
}
