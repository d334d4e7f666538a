//! Active filter values

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Numeric bounds of a range filter; a missing bound is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumericRange {
	/// Inclusive lower bound
	#[serde(default)]
	pub min: Option<f64>,
	/// Inclusive upper bound
	#[serde(default)]
	pub max: Option<f64>,
}

/// Bounds of a date-range filter, as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
	/// Inclusive start date
	#[serde(default)]
	pub from: Option<String>,
	/// Inclusive end date
	#[serde(default)]
	pub to: Option<String>,
}

fn blank(bound: &Option<String>) -> bool {
	bound.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// The value a user has entered for one filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
	/// Single string (text, select, date, time, or `"true"`/`"false"`)
	Text(String),
	/// Multiselect: the row value must be one of these
	Multi(Vec<String>),
	/// Numeric range
	Range(NumericRange),
	/// Date range
	DateRange(DateRange),
}

impl FilterValue {
	/// Creates a text value
	pub fn text(value: impl Into<String>) -> Self {
		Self::Text(value.into())
	}

	/// Creates a multiselect value
	pub fn multi<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Multi(values.into_iter().map(Into::into).collect())
	}

	/// Creates a numeric range value
	pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
		Self::Range(NumericRange { min, max })
	}

	/// Creates a date range value
	pub fn date_range(from: Option<&str>, to: Option<&str>) -> Self {
		Self::DateRange(DateRange {
			from: from.map(str::to_string),
			to: to.map(str::to_string),
		})
	}

	/// Returns true if this value does not constrain anything.
	///
	/// Empty values are pruned before evaluation: they never match and never
	/// exclude, they simply are not filters.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_tables::filtering::FilterValue;
	///
	/// assert!(FilterValue::text("").is_empty());
	/// assert!(FilterValue::multi(Vec::<String>::new()).is_empty());
	/// assert!(FilterValue::range(None, None).is_empty());
	/// assert!(FilterValue::date_range(Some(""), None).is_empty());
	/// assert!(!FilterValue::range(Some(0.0), None).is_empty());
	/// ```
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(s) => s.trim().is_empty(),
			Self::Multi(values) => values.is_empty(),
			Self::Range(range) => range.min.is_none() && range.max.is_none(),
			Self::DateRange(range) => blank(&range.from) && blank(&range.to),
		}
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

/// The set of filters currently applied to a table, keyed by field.
///
/// Absence of a key means "no constraint". Setting an empty value removes the
/// key instead of storing it; when deserializing, `null` and empty values are
/// dropped the same way.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ActiveFilters {
	values: IndexMap<String, FilterValue>,
}

impl ActiveFilters {
	/// Creates an empty filter set
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`set`](Self::set)
	pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		self.set(key, value);
		self
	}

	/// Sets (or, for an empty value, removes) the filter on `key`
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_tables::filtering::ActiveFilters;
	///
	/// let mut filters = ActiveFilters::new();
	/// filters.set("rol", "admin");
	/// assert_eq!(filters.active_count(), 1);
	///
	/// filters.set("rol", "");
	/// assert!(filters.is_empty());
	/// ```
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
		let key = key.into();
		let value = value.into();
		if value.is_empty() {
			self.values.shift_remove(&key);
		} else {
			self.values.insert(key, value);
		}
	}

	/// Removes the filter on `key`, returning its value
	pub fn clear(&mut self, key: &str) -> Option<FilterValue> {
		self.values.shift_remove(key)
	}

	/// Removes every filter
	pub fn clear_all(&mut self) {
		self.values.clear();
	}

	/// Returns the value set for `key`
	pub fn get(&self, key: &str) -> Option<&FilterValue> {
		self.values.get(key).filter(|value| !value.is_empty())
	}

	/// Iterates over the non-empty filters in the order they were set
	pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
		self.values
			.iter()
			.filter(|(_, value)| !value.is_empty())
			.map(|(key, value)| (key.as_str(), value))
	}

	/// Number of non-empty filters
	pub fn active_count(&self) -> usize {
		self.active().count()
	}

	/// Returns true if no filter constrains the table
	pub fn is_empty(&self) -> bool {
		self.active_count() == 0
	}
}

impl<'de> Deserialize<'de> for ActiveFilters {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = IndexMap::<String, Option<FilterValue>>::deserialize(deserializer)?;
		Ok(raw
			.into_iter()
			.filter_map(|(key, value)| value.map(|value| (key, value)))
			.collect())
	}
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for ActiveFilters {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut filters = Self::new();
		for (key, value) in iter {
			filters.set(key, value);
		}
		filters
	}
}
