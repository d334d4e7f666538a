//! Sorting functionality for tables
//!
//! Sorting is semantic per field: unit numbers and prices compare as integers,
//! status columns compare by a fixed rank, everything else compares as
//! case-insensitive text. Each field declares its [`FieldKind`] explicitly.

use pasaje_core::{Record, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending order
	#[default]
	#[serde(alias = "asc")]
	Ascending,
	/// Descending order
	#[serde(alias = "desc")]
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Parses a sort direction from a query parameter
	///
	/// Returns `Ascending` for positive values and `Descending` for negative values
	/// (e.g., "name" -> Ascending, "-name" -> Descending)
	pub fn parse_from_query(s: &str) -> (Self, &str) {
		if let Some(field) = s.strip_prefix('-') {
			(Self::Descending, field)
		} else {
			(Self::Ascending, s)
		}
	}

	/// Applies the direction to an ascending comparison result
	pub fn apply(&self, ordering: Ordering) -> Ordering {
		match self {
			Self::Ascending => ordering,
			Self::Descending => ordering.reverse(),
		}
	}
}

/// Current sort of a table; no key means original order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
	/// Field being sorted on
	pub key: Option<String>,
	/// Direction of the sort
	#[serde(default)]
	pub direction: SortDirection,
}

impl SortState {
	/// Unsorted state
	pub fn unsorted() -> Self {
		Self::default()
	}

	/// Sorted on `key` in `direction`
	pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			key: Some(key.into()),
			direction,
		}
	}

	/// Parses `"field"` / `"-field"`; an empty string is unsorted
	pub fn from_query(query: &str) -> Self {
		let (direction, key) = SortDirection::parse_from_query(query.trim());
		if key.is_empty() {
			Self::unsorted()
		} else {
			Self::by(key, direction)
		}
	}

	/// Handles a click on the header of `key`: the same key flips direction,
	/// a new key starts ascending.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_tables::sorting::{SortDirection, SortState};
	///
	/// let mut sort = SortState::unsorted();
	/// sort.toggle("precio");
	/// assert_eq!(sort, SortState::by("precio", SortDirection::Ascending));
	/// sort.toggle("precio");
	/// assert_eq!(sort.direction, SortDirection::Descending);
	/// sort.toggle("precio");
	/// assert_eq!(sort.direction, SortDirection::Ascending);
	/// sort.toggle("origen");
	/// assert_eq!(sort, SortState::by("origen", SortDirection::Ascending));
	/// ```
	pub fn toggle(&mut self, key: &str) {
		if self.key.as_deref() == Some(key) {
			self.direction = self.direction.toggle();
		} else {
			self.key = Some(key.to_string());
			self.direction = SortDirection::Ascending;
		}
	}

	/// Restores the original order
	pub fn clear(&mut self) {
		*self = Self::unsorted();
	}

	/// Returns true if a sort key is active
	pub fn is_sorted(&self) -> bool {
		self.key.is_some()
	}
}

/// Semantic comparison class of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
	/// Digits only, compared as an integer (`"Bus 12"` -> 12, `"$1,200"` -> 1200)
	Numeric,
	/// Ranked by [`StatusRanking`]
	Status,
	/// Case-insensitive text
	#[default]
	Lexicographic,
}

/// Fixed rank order for status values.
///
/// The longest label contained in the lower-cased value decides its rank, so
/// `"Inactivo"` ranks as inactive even though it also contains `"activo"`.
/// Values matching no label rank after every known label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRanking {
	labels: Vec<(String, u32)>,
}

impl StatusRanking {
	/// Creates an empty ranking; every value is unknown
	pub fn new() -> Self {
		Self { labels: Vec::new() }
	}

	/// Adds a label with its rank (lower sorts first)
	pub fn with(mut self, label: impl Into<String>, rank: u32) -> Self {
		self.labels.push((label.into().to_lowercase(), rank));
		self
	}

	/// Returns the rank of `value`
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_tables::sorting::StatusRanking;
	///
	/// let ranking = StatusRanking::default();
	/// assert_eq!(ranking.rank("Activo"), 0);
	/// assert_eq!(ranking.rank("INACTIVE"), 1);
	/// assert_eq!(ranking.rank("Suspendido"), 2);
	/// ```
	pub fn rank(&self, value: &str) -> u32 {
		let value = value.to_lowercase();
		self.labels
			.iter()
			.filter(|(label, _)| !label.is_empty() && value.contains(label.as_str()))
			.max_by_key(|(label, _)| label.len())
			.map(|(_, rank)| *rank)
			.unwrap_or_else(|| self.unknown_rank())
	}

	fn unknown_rank(&self) -> u32 {
		self.labels
			.iter()
			.map(|(_, rank)| rank.saturating_add(1))
			.max()
			.unwrap_or(0)
	}
}

impl Default for StatusRanking {
	fn default() -> Self {
		Self::new()
			.with("active", 0)
			.with("activo", 0)
			.with("inactive", 1)
			.with("inactivo", 1)
	}
}

/// Extracts the digits of a value as an integer; no digits (or overflow) is 0
///
/// # Examples
///
/// ```
/// use pasaje_core::Value;
/// use pasaje_tables::sorting::numeric_key;
///
/// assert_eq!(numeric_key(&Value::Text("Asiento 12B".into())), 12);
/// assert_eq!(numeric_key(&Value::Text("$1,200".into())), 1200);
/// assert_eq!(numeric_key(&Value::Null), 0);
/// ```
pub fn numeric_key(value: &Value) -> u64 {
	let digits: String = value
		.to_text()
		.chars()
		.filter(|c| c.is_ascii_digit())
		.collect();
	digits.parse().unwrap_or(0)
}

/// Per-field semantic comparator
#[derive(Debug, Clone, Default)]
pub struct SmartComparator {
	kinds: HashMap<String, FieldKind>,
	ranking: StatusRanking,
}

impl SmartComparator {
	/// Creates a comparator where every field is lexicographic
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares the kind of `key`
	pub fn with_kind(mut self, key: impl Into<String>, kind: FieldKind) -> Self {
		self.kinds.insert(key.into(), kind);
		self
	}

	/// Replaces the status ranking
	pub fn with_ranking(mut self, ranking: StatusRanking) -> Self {
		self.ranking = ranking;
		self
	}

	/// Returns the declared kind of `key`
	pub fn kind(&self, key: &str) -> FieldKind {
		self.kinds.get(key).copied().unwrap_or_default()
	}

	/// Compares two rows on `key` in ascending order
	pub fn compare<R: Record>(&self, a: &R, b: &R, key: &str) -> Ordering {
		let (left, right) = (a.field(key), b.field(key));
		match self.kind(key) {
			FieldKind::Numeric => numeric_key(&left).cmp(&numeric_key(&right)),
			FieldKind::Status => self
				.ranking
				.rank(&left.to_text())
				.cmp(&self.ranking.rank(&right.to_text())),
			FieldKind::Lexicographic => left
				.to_text()
				.to_lowercase()
				.cmp(&right.to_text().to_lowercase()),
		}
	}

	/// Stable-sorts `rows` by `sort`; an unsorted state leaves them untouched
	pub fn sort<R: Record>(&self, rows: &mut [&R], sort: &SortState) {
		if let Some(key) = sort.key.as_deref() {
			rows.sort_by(|a, b| sort.direction.apply(self.compare(*a, *b, key)));
		}
	}
}

/// Trait for sortable tables
pub trait Sortable {
	/// Sorts the table by the specified field and direction
	fn sort_by(&mut self, field: &str, direction: SortDirection);

	/// Returns the current sort field and direction
	fn current_sort(&self) -> Option<(&str, SortDirection)>;
}
