//! Filter predicate evaluation
//!
//! Decides, for one row and one active filter, whether the row survives. The
//! generic rules are driven by the descriptor's [`FilterType`] and the shape of
//! the [`FilterValue`]; domain-specific rules (for example "discount type" or
//! "discount status" columns whose display differs from their stored value)
//! are injected per key through [`FilterPredicate`] overrides.

use super::active::{ActiveFilters, DateRange, FilterValue, NumericRange};
use super::descriptor::{FilterDescriptor, FilterType};
use indexmap::IndexMap;
use pasaje_core::temporal::{normalize_date, normalize_time, parse_date};
use pasaje_core::{Record, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A per-key predicate that replaces the generic type-based dispatch.
///
/// Implemented for every `Fn(&R, &FilterValue) -> bool`.
///
/// # Examples
///
/// ```
/// use pasaje_core::{Record, Row};
/// use pasaje_tables::filtering::{FilterEvaluator, FilterValue};
///
/// // "vigente" means the discount has uses left, whatever its stored status
/// let evaluator = FilterEvaluator::<Row>::new().with_override(
///     "estado_descuento",
///     |row: &Row, value: &FilterValue| {
///         let vigente = row.field("usos_restantes").to_number() > 0.0;
///         match value {
///             FilterValue::Text(v) if v == "vigente" => vigente,
///             FilterValue::Text(v) if v == "agotado" => !vigente,
///             _ => true,
///         }
///     },
/// );
///
/// let row = Row::new().with("usos_restantes", 0).with("estado_descuento", "vigente");
/// assert!(!evaluator.matches(&row, "estado_descuento", &FilterValue::text("vigente")));
/// ```
pub trait FilterPredicate<R>: Send + Sync {
	/// Returns true if `row` satisfies the filter `value`
	fn matches(&self, row: &R, value: &FilterValue) -> bool;
}

impl<R, F> FilterPredicate<R> for F
where
	F: Fn(&R, &FilterValue) -> bool + Send + Sync,
{
	fn matches(&self, row: &R, value: &FilterValue) -> bool {
		self(row, value)
	}
}

/// Evaluates active filters against rows
pub struct FilterEvaluator<R> {
	descriptors: IndexMap<String, FilterDescriptor>,
	overrides: HashMap<String, Arc<dyn FilterPredicate<R>>>,
}

impl<R> FilterEvaluator<R> {
	/// Creates an evaluator with no descriptors; every key is treated as a
	/// text filter until described
	pub fn new() -> Self {
		Self {
			descriptors: IndexMap::new(),
			overrides: HashMap::new(),
		}
	}

	/// Builder-style [`add_descriptor`](Self::add_descriptor)
	pub fn with_descriptor(mut self, descriptor: FilterDescriptor) -> Self {
		self.add_descriptor(descriptor);
		self
	}

	/// Registers a descriptor, replacing any previous one for the same key
	pub fn add_descriptor(&mut self, descriptor: FilterDescriptor) {
		self.descriptors.insert(descriptor.key.clone(), descriptor);
	}

	/// Registers an override predicate for `key`
	pub fn with_override(
		mut self,
		key: impl Into<String>,
		predicate: impl FilterPredicate<R> + 'static,
	) -> Self {
		self.overrides.insert(key.into(), Arc::new(predicate));
		self
	}

	/// Returns the descriptor for `key`
	pub fn descriptor(&self, key: &str) -> Option<&FilterDescriptor> {
		self.descriptors.get(key)
	}

	/// Iterates over descriptors in registration order
	pub fn descriptors(&self) -> impl Iterator<Item = &FilterDescriptor> {
		self.descriptors.values()
	}

	/// Returns the declared type for `key`, defaulting to text
	pub fn filter_type(&self, key: &str) -> FilterType {
		self.descriptors
			.get(key)
			.map(|d| d.filter_type)
			.unwrap_or_default()
	}

	/// Returns true if an override predicate is registered for `key`
	pub fn has_override(&self, key: &str) -> bool {
		self.overrides.contains_key(key)
	}
}

impl<R: Record> FilterEvaluator<R> {
	/// Decides whether `row` satisfies the filter `value` on `key`.
	///
	/// Empty values do not constrain and always pass; callers normally prune
	/// them beforehand through [`ActiveFilters`].
	pub fn matches(&self, row: &R, key: &str, value: &FilterValue) -> bool {
		if value.is_empty() {
			return true;
		}
		if let Some(predicate) = self.overrides.get(key) {
			return predicate.matches(row, value);
		}
		value_matches(&row.field(key), value, self.filter_type(key))
	}

	/// Returns true if `row` satisfies every active filter
	pub fn matches_all(&self, row: &R, filters: &ActiveFilters) -> bool {
		filters
			.active()
			.all(|(key, value)| self.matches(row, key, value))
	}

	/// Keeps the rows satisfying every active filter, preserving order
	pub fn apply<'a>(&self, rows: Vec<&'a R>, filters: &ActiveFilters) -> Vec<&'a R> {
		if filters.is_empty() {
			return rows;
		}
		tracing::trace!(active = filters.active_count(), "applying filters");
		rows.into_iter()
			.filter(|row| self.matches_all(row, filters))
			.collect()
	}
}

impl<R> Default for FilterEvaluator<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> Clone for FilterEvaluator<R> {
	fn clone(&self) -> Self {
		Self {
			descriptors: self.descriptors.clone(),
			overrides: self.overrides.clone(),
		}
	}
}

impl<R> fmt::Debug for FilterEvaluator<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterEvaluator")
			.field("descriptors", &self.descriptors)
			.field("overrides", &self.overrides.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Generic, type-driven match of one cell against one filter value.
///
/// # Examples
///
/// ```
/// use pasaje_core::Value;
/// use pasaje_tables::filtering::{value_matches, FilterType, FilterValue};
///
/// let cell = Value::Text("Activo ".into());
/// assert!(value_matches(&cell, &FilterValue::text("Activo"), FilterType::Select));
/// assert!(!value_matches(&cell, &FilterValue::text("Act"), FilterType::Select));
/// assert!(value_matches(&cell, &FilterValue::text("act"), FilterType::Text));
/// ```
pub fn value_matches(cell: &Value, value: &FilterValue, filter_type: FilterType) -> bool {
	match value {
		FilterValue::Multi(options) => {
			let text = cell.to_text();
			options.iter().any(|option| *option == text)
		}
		FilterValue::Range(range) => number_in_range(cell.to_number(), range),
		FilterValue::DateRange(range) => date_in_range(cell, range),
		FilterValue::Text(wanted) => text_matches(cell, wanted.trim(), filter_type),
	}
}

fn text_matches(cell: &Value, wanted: &str, filter_type: FilterType) -> bool {
	if let Some(flag) = bool_literal(wanted) {
		return cell.to_text() == wanted || cell.as_bool() == Some(flag);
	}
	let text = cell.to_text();
	match filter_type {
		FilterType::Select => text.trim() == wanted,
		FilterType::Date => normalize_date(&text) == normalize_date(wanted),
		FilterType::Time => normalize_time(&text) == normalize_time(wanted),
		FilterType::Text | FilterType::Range => {
			text.to_lowercase().contains(&wanted.to_lowercase())
		}
	}
}

fn bool_literal(value: &str) -> Option<bool> {
	match value {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

fn number_in_range(n: f64, range: &NumericRange) -> bool {
	range.min.is_none_or(|min| n >= min) && range.max.is_none_or(|max| n <= max)
}

// Unparsable bounds leave that side open; an unparsable row date excludes the row.
fn date_in_range(cell: &Value, range: &DateRange) -> bool {
	let Some(date) = cell.as_date() else {
		return false;
	};
	let from = range.from.as_deref().and_then(parse_date);
	let to = range.to.as_deref().and_then(parse_date);
	from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pasaje_core::Row;
	use rstest::{fixture, rstest};

	#[fixture]
	fn evaluator() -> FilterEvaluator<Row> {
		FilterEvaluator::new()
			.with_descriptor(FilterDescriptor::select("estado_texto", "Estado"))
			.with_descriptor(FilterDescriptor::range("precio", "Precio"))
			.with_descriptor(FilterDescriptor::date("fecha_salida", "Fecha"))
			.with_descriptor(FilterDescriptor::time("hora_salida", "Hora"))
	}

	#[rstest]
	#[case("Activo", true)]
	#[case(" Activo ", true)]
	#[case("activo", false)]
	#[case("Inactivo", false)]
	fn test_select_exact_trimmed(
		evaluator: FilterEvaluator<Row>,
		#[case] wanted: &str,
		#[case] expected: bool,
	) {
		let row = Row::new().with("estado_texto", "Activo");
		assert_eq!(
			evaluator.matches(&row, "estado_texto", &FilterValue::text(wanted)),
			expected
		);
	}

	#[rstest]
	#[case(Some(10.0), Some(20.0), true)]
	#[case(Some(15.5), None, true)]
	#[case(None, Some(15.0), false)]
	#[case(Some(15.5), Some(15.5), true)]
	fn test_range_bounds(
		evaluator: FilterEvaluator<Row>,
		#[case] min: Option<f64>,
		#[case] max: Option<f64>,
		#[case] expected: bool,
	) {
		let row = Row::new().with("precio", "15.50");
		assert_eq!(
			evaluator.matches(&row, "precio", &FilterValue::range(min, max)),
			expected
		);
	}

	#[rstest]
	fn test_range_non_numeric_is_zero(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("precio", "gratis");
		assert!(evaluator.matches(&row, "precio", &FilterValue::range(None, Some(0.0))));
		assert!(!evaluator.matches(&row, "precio", &FilterValue::range(Some(1.0), None)));
	}

	#[rstest]
	fn test_single_date_strips_time(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("fecha_salida", "2024-05-01T06:30:00");
		assert!(evaluator.matches(&row, "fecha_salida", &FilterValue::text("2024-05-01")));
		assert!(!evaluator.matches(&row, "fecha_salida", &FilterValue::text("2024-05-02")));
	}

	#[rstest]
	fn test_date_range_inclusive(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("fecha_salida", "2024-05-31 22:00");
		let range = FilterValue::date_range(Some("2024-05-01"), Some("2024-05-31"));
		assert!(evaluator.matches(&row, "fecha_salida", &range));
	}

	#[rstest]
	fn test_date_range_unparsable_row_is_excluded(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("fecha_salida", "por confirmar");
		let range = FilterValue::date_range(Some("2024-05-01"), None);
		assert!(!evaluator.matches(&row, "fecha_salida", &range));
		let missing = Row::new();
		assert!(!evaluator.matches(&missing, "fecha_salida", &range));
	}

	#[rstest]
	fn test_date_range_unparsable_bound_is_open(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("fecha_salida", "2020-01-01");
		let range = FilterValue::date_range(Some("ayer"), Some("2024-01-01"));
		assert!(evaluator.matches(&row, "fecha_salida", &range));
	}

	#[rstest]
	fn test_time_equality(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("hora_salida", "08:15:00");
		assert!(evaluator.matches(&row, "hora_salida", &FilterValue::text("08:15")));
		assert!(!evaluator.matches(&row, "hora_salida", &FilterValue::text("08:16")));
	}

	#[rstest]
	#[case(Value::Bool(true), "true", true)]
	#[case(Value::Text("true".into()), "true", true)]
	#[case(Value::Bool(false), "true", false)]
	#[case(Value::Bool(false), "false", true)]
	#[case(Value::Null, "false", false)]
	fn test_boolean_coded(#[case] cell: Value, #[case] wanted: &str, #[case] expected: bool) {
		let evaluator = FilterEvaluator::<Row>::new();
		let row = Row::new().with("activo", cell);
		assert_eq!(
			evaluator.matches(&row, "activo", &FilterValue::text(wanted)),
			expected
		);
	}

	#[rstest]
	fn test_multiselect(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("rol", "vendedor");
		let wanted = FilterValue::multi(["admin", "vendedor"]);
		assert!(evaluator.matches(&row, "rol", &wanted));
		let other = Row::new().with("rol", "cliente");
		assert!(!evaluator.matches(&other, "rol", &wanted));
	}

	#[rstest]
	fn test_default_text_is_case_insensitive_substring(evaluator: FilterEvaluator<Row>) {
		let row = Row::new().with("ruta", "Quito - Guayaquil");
		assert!(evaluator.matches(&row, "ruta", &FilterValue::text("GUAYA")));
		assert!(!evaluator.matches(&row, "ruta", &FilterValue::text("Cuenca")));
	}

	#[rstest]
	fn test_override_takes_precedence(evaluator: FilterEvaluator<Row>) {
		let evaluator = evaluator.with_override("estado_texto", |_: &Row, _: &FilterValue| true);
		let row = Row::new().with("estado_texto", "Inactivo");
		assert!(evaluator.has_override("estado_texto"));
		assert!(evaluator.matches(&row, "estado_texto", &FilterValue::text("Activo")));
	}

	#[rstest]
	fn test_empty_value_never_constrains(evaluator: FilterEvaluator<Row>) {
		let row = Row::new();
		assert!(evaluator.matches(&row, "estado_texto", &FilterValue::text("")));
		assert!(evaluator.matches(&row, "precio", &FilterValue::range(None, None)));
	}

	#[rstest]
	fn test_apply_is_conjunction(evaluator: FilterEvaluator<Row>) {
		let rows = vec![
			Row::new().with("estado_texto", "Activo").with("precio", 10),
			Row::new().with("estado_texto", "Activo").with("precio", 30),
			Row::new().with("estado_texto", "Inactivo").with("precio", 10),
		];
		let filters = ActiveFilters::new()
			.with("estado_texto", "Activo")
			.with("precio", FilterValue::range(None, Some(20.0)));
		let kept = evaluator.apply(rows.iter().collect(), &filters);
		assert_eq!(kept.len(), 1);
		assert!(std::ptr::eq(kept[0], &rows[0]));
	}

	#[rstest]
	fn test_undescribed_key_defaults_to_text(evaluator: FilterEvaluator<Row>) {
		assert_eq!(evaluator.filter_type("desconocido"), FilterType::Text);
		assert_eq!(evaluator.filter_type("precio"), FilterType::Range);
	}
}
