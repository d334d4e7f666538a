//! Free-text search
//!
//! A row matches a query if any of its searchable fields contains it. Fields
//! are either literal keys or derived extractors, which lets a table search a
//! composite value (a passenger's full name, a formatted discount label) that
//! is not stored as one field.

use pasaje_core::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

type Extractor<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// A searchable field of a table
pub enum SearchField<R> {
	/// Value of the named row field
	Literal(String),
	/// Value computed from the whole row
	Derived {
		/// Name used in diagnostics
		name: String,
		/// Extractor producing the searchable text
		extract: Extractor<R>,
	},
}

impl<R> SearchField<R> {
	/// Searches the row field `key`
	pub fn literal(key: impl Into<String>) -> Self {
		Self::Literal(key.into())
	}

	/// Searches a value computed from the row
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_core::{Record, Row};
	/// use pasaje_tables::search::SearchField;
	///
	/// let full_name = SearchField::derived("nombreCompleto", |row: &Row| {
	///     format!("{} {}", row.field_text("nombre"), row.field_text("apellido"))
	/// });
	/// let row = Row::new().with("nombre", "Juan").with("apellido", "Pérez");
	/// assert_eq!(full_name.resolve(&row), "Juan Pérez");
	/// ```
	pub fn derived<F>(name: impl Into<String>, extract: F) -> Self
	where
		F: Fn(&R) -> String + Send + Sync + 'static,
	{
		Self::Derived {
			name: name.into(),
			extract: Arc::new(extract),
		}
	}

	/// Name of the field (the key for literal fields)
	pub fn name(&self) -> &str {
		match self {
			Self::Literal(key) => key,
			Self::Derived { name, .. } => name,
		}
	}
}

impl<R: Record> SearchField<R> {
	/// Resolves the searchable text of `row`; missing fields are empty
	pub fn resolve(&self, row: &R) -> String {
		match self {
			Self::Literal(key) => row.field_text(key),
			Self::Derived { extract, .. } => extract(row),
		}
	}
}

impl<R> Clone for SearchField<R> {
	fn clone(&self) -> Self {
		match self {
			Self::Literal(key) => Self::Literal(key.clone()),
			Self::Derived { name, extract } => Self::Derived {
				name: name.clone(),
				extract: Arc::clone(extract),
			},
		}
	}
}

impl<R> fmt::Debug for SearchField<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(key) => f.debug_tuple("Literal").field(key).finish(),
			Self::Derived { name, .. } => f
				.debug_struct("Derived")
				.field("name", name)
				.finish_non_exhaustive(),
		}
	}
}

/// Search behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
	/// Compare without lower-casing either side
	pub case_sensitive: bool,
	/// Require a field to equal the query instead of containing it
	pub exact_match: bool,
	/// Split the query into words; each word must appear in some field
	pub search_by_words: bool,
}

/// Matches rows against a free-text query
pub struct SearchMatcher<R> {
	fields: Vec<SearchField<R>>,
	options: SearchOptions,
}

impl<R> SearchMatcher<R> {
	/// Creates a matcher over `fields` with default options
	pub fn new(fields: Vec<SearchField<R>>) -> Self {
		Self {
			fields,
			options: SearchOptions::default(),
		}
	}

	/// Creates a matcher over literal field keys
	pub fn literal<I, S>(keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(keys.into_iter().map(SearchField::literal).collect())
	}

	/// Replaces the options
	pub fn with_options(mut self, options: SearchOptions) -> Self {
		self.options = options;
		self
	}

	/// Adds a searchable field
	pub fn with_field(mut self, field: SearchField<R>) -> Self {
		self.fields.push(field);
		self
	}

	/// Returns the searchable fields
	pub fn fields(&self) -> &[SearchField<R>] {
		&self.fields
	}

	/// Returns the options
	pub fn options(&self) -> SearchOptions {
		self.options
	}

	fn normalize(&self, text: &str) -> String {
		if self.options.case_sensitive {
			text.to_string()
		} else {
			text.to_lowercase()
		}
	}

	fn hit(&self, haystack: &str, needle: &str) -> bool {
		if self.options.exact_match {
			haystack.trim() == needle
		} else {
			haystack.contains(needle)
		}
	}
}

impl<R: Record> SearchMatcher<R> {
	/// Returns true if `row` matches `query`.
	///
	/// An empty or whitespace-only query matches every row.
	pub fn matches(&self, row: &R, query: &str) -> bool {
		let query = query.trim();
		if query.is_empty() {
			return true;
		}
		let needle = self.normalize(query);
		self.matches_prepared(row, &needle)
	}

	fn matches_prepared(&self, row: &R, needle: &str) -> bool {
		let values: Vec<String> = self
			.fields
			.iter()
			.map(|field| self.normalize(&field.resolve(row)))
			.collect();

		if self.options.search_by_words {
			needle
				.split_whitespace()
				.all(|word| values.iter().any(|value| self.hit(value, word)))
		} else {
			values.iter().any(|value| self.hit(value, needle))
		}
	}

	/// Keeps the rows matching `query`, in input order.
	///
	/// An empty or whitespace-only query returns `rows` unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_core::Row;
	/// use pasaje_tables::search::SearchMatcher;
	///
	/// let rows = vec![
	///     Row::new().with("origen", "Quito").with("destino", "Loja"),
	///     Row::new().with("origen", "Cuenca").with("destino", "Quito"),
	///     Row::new().with("origen", "Ambato").with("destino", "Loja"),
	/// ];
	/// let matcher = SearchMatcher::literal(["origen", "destino"]);
	///
	/// assert_eq!(matcher.search(rows.iter().collect(), "quito").len(), 2);
	/// assert_eq!(matcher.search(rows.iter().collect(), "  ").len(), 3);
	/// ```
	pub fn search<'a>(&self, rows: Vec<&'a R>, query: &str) -> Vec<&'a R> {
		let query = query.trim();
		if query.is_empty() {
			return rows;
		}
		let needle = self.normalize(query);
		rows.into_iter()
			.filter(|row| self.matches_prepared(row, &needle))
			.collect()
	}
}

impl<R> Clone for SearchMatcher<R> {
	fn clone(&self) -> Self {
		Self {
			fields: self.fields.clone(),
			options: self.options,
		}
	}
}

impl<R> fmt::Debug for SearchMatcher<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SearchMatcher")
			.field("fields", &self.fields)
			.field("options", &self.options)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pasaje_core::Row;
	use rstest::{fixture, rstest};

	#[fixture]
	fn users() -> Vec<Row> {
		vec![
			Row::new()
				.with("nombre", "Juan")
				.with("apellido", "Pérez")
				.with("email", "jperez@pasaje.ec"),
			Row::new()
				.with("nombre", "María")
				.with("apellido", "Juanes")
				.with("email", "mjuanes@pasaje.ec"),
			Row::new()
				.with("nombre", "Pedro")
				.with("apellido", "Andrade")
				.with("email", "pandrade@pasaje.ec"),
		]
	}

	fn full_name() -> SearchField<Row> {
		SearchField::derived("nombreCompleto", |row: &Row| {
			format!("{} {}", row.field_text("nombre"), row.field_text("apellido"))
		})
	}

	#[rstest]
	fn test_derived_field_match(users: Vec<Row>) {
		let matcher = SearchMatcher::new(vec![full_name()]);
		let found = matcher.search(users.iter().collect(), "juan pé");
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].field_text("nombre"), "Juan");
	}

	#[rstest]
	fn test_any_field_matches(users: Vec<Row>) {
		let matcher = SearchMatcher::literal(["nombre", "apellido"]);
		let found = matcher.search(users.iter().collect(), "JUAN");
		let names: Vec<String> = found.iter().map(|r| r.field_text("nombre")).collect();
		assert_eq!(names, vec!["Juan", "María"]);
	}

	#[rstest]
	fn test_case_sensitive(users: Vec<Row>) {
		let matcher = SearchMatcher::literal(["nombre"]).with_options(SearchOptions {
			case_sensitive: true,
			..SearchOptions::default()
		});
		assert!(matcher.search(users.iter().collect(), "juan").is_empty());
		assert_eq!(matcher.search(users.iter().collect(), "Juan").len(), 1);
	}

	#[rstest]
	fn test_exact_match(users: Vec<Row>) {
		let matcher = SearchMatcher::literal(["nombre", "apellido"]).with_options(SearchOptions {
			exact_match: true,
			..SearchOptions::default()
		});
		let found = matcher.search(users.iter().collect(), "juan");
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].field_text("apellido"), "Pérez");
	}

	#[rstest]
	fn test_search_by_words_across_fields(users: Vec<Row>) {
		let matcher = SearchMatcher::literal(["nombre", "email"]).with_options(SearchOptions {
			search_by_words: true,
			..SearchOptions::default()
		});
		// "pedro" is in nombre, "andrade" only in email
		let found = matcher.search(users.iter().collect(), "pedro andrade");
		assert_eq!(found.len(), 1);
		assert!(matcher.search(users.iter().collect(), "pedro juanes").is_empty());
	}

	#[rstest]
	fn test_without_words_phrase_must_be_contiguous(users: Vec<Row>) {
		let matcher = SearchMatcher::literal(["nombre", "email"]);
		assert!(matcher.search(users.iter().collect(), "pedro andrade").is_empty());
	}

	#[rstest]
	fn test_missing_field_never_matches(users: Vec<Row>) {
		let matcher = SearchMatcher::literal(["telefono"]);
		assert!(matcher.search(users.iter().collect(), "0").is_empty());
		assert!(matcher.matches(&users[0], ""));
	}

	#[rstest]
	fn test_debug_hides_extractor() {
		let field = full_name();
		assert_eq!(field.name(), "nombreCompleto");
		assert!(format!("{field:?}").starts_with("Derived"));
	}

	#[rstest]
	fn test_options_deserialize_with_defaults() {
		let options: SearchOptions = serde_json::from_str(r#"{"exact_match": true}"#).unwrap();
		assert!(options.exact_match);
		assert!(!options.case_sensitive);
		assert!(!options.search_by_words);
	}
}
