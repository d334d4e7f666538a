//! Declarative table settings
//!
//! A list view describes its table (page size, searchable fields, columns,
//! filter panel, status order) in a TOML or JSON document. Settings are parsed,
//! validated, optionally overridden from prefixed environment variables and
//! then turned into a [`TableEngine`] and an initial [`TableState`].
//!
//! ```toml
//! name = "buses"
//! rows_per_page = 10
//!
//! [search]
//! fields = ["unidad", "placa"]
//!
//! [[columns]]
//! key = "capacidad"
//! header = "Capacidad"
//! kind = "numeric"
//!
//! [[filters]]
//! key = "estado_texto"
//! label = "Estado"
//! type = "select"
//! ```

use crate::error::{ConfError, Result};
use pasaje_core::TableError;
use pasaje_tables::column::ColumnSpec;
use pasaje_tables::filtering::{FilterDescriptor, FilterType};
use pasaje_tables::pipeline::{DEFAULT_MAX_VISIBLE_PAGES, TableEngine};
use pasaje_tables::search::{SearchMatcher, SearchOptions};
use pasaje_tables::sorting::StatusRanking;
use pasaje_tables::state::{DEFAULT_ROWS_PER_PAGE, TableState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A column as declared in settings
pub type ColumnSettings = ColumnSpec;

/// Search section of [`TableSettings`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
	/// Whether the table has a search box at all
	pub enabled: bool,
	/// Searched field keys; empty means every declared column
	pub fields: Vec<String>,
	/// Matching options
	pub options: SearchOptions,
}

impl Default for SearchSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			fields: Vec::new(),
			options: SearchOptions::default(),
		}
	}
}

/// One entry of a custom status order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRankSetting {
	/// Case-insensitive label contained in the status value
	pub label: String,
	/// Sort rank (lower first)
	pub rank: u32,
}

/// Settings for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
	/// Table name, used in log events and as a conventional env prefix
	pub name: String,
	/// Rows shown per page
	pub rows_per_page: usize,
	/// Page buttons in the pagination window
	pub max_visible_pages: usize,
	/// Search box configuration
	pub search: SearchSettings,
	/// Declared columns, in display order
	pub columns: Vec<ColumnSettings>,
	/// Filter panel controls, in display order
	pub filters: Vec<FilterDescriptor>,
	/// Custom status order; empty keeps the built-in active/inactive order
	pub status_ranking: Vec<StatusRankSetting>,
}

impl Default for TableSettings {
	fn default() -> Self {
		Self {
			name: String::new(),
			rows_per_page: DEFAULT_ROWS_PER_PAGE,
			max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
			search: SearchSettings::default(),
			columns: Vec::new(),
			filters: Vec::new(),
			status_ranking: Vec::new(),
		}
	}
}

impl TableSettings {
	/// Parses and validates settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_conf::TableSettings;
	///
	/// let settings = TableSettings::from_toml_str(r#"
	///     name = "localidades"
	///     rows_per_page = 25
	///
	///     [[filters]]
	///     key = "provincia"
	///     type = "select"
	/// "#).unwrap();
	///
	/// assert_eq!(settings.rows_per_page, 25);
	/// assert_eq!(settings.max_visible_pages, 5);
	/// assert!(settings.search.enabled);
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Parses and validates settings from a JSON document
	pub fn from_json_str(content: &str) -> Result<Self> {
		let settings: Self = serde_json::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Loads settings from a `.toml` or `.json` file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.map(str::to_ascii_lowercase)
			.unwrap_or_default();
		let content = match extension.as_str() {
			"toml" | "json" => std::fs::read_to_string(path)?,
			_ => {
				return Err(ConfError::UnsupportedFormat(format!(
					"{} (expected .toml or .json)",
					path.display()
				)));
			}
		};
		tracing::debug!(path = %path.display(), "loading table settings");
		if extension == "toml" {
			Self::from_toml_str(&content)
		} else {
			Self::from_json_str(&content)
		}
	}

	/// Overrides page sizing from the process environment.
	///
	/// Reads `{prefix}ROWS_PER_PAGE` and `{prefix}MAX_VISIBLE_PAGES`. Values
	/// that are not positive integers are ignored with a warning.
	pub fn apply_env(&mut self, prefix: &str) {
		self.apply_env_with(prefix, |key| std::env::var(key).ok());
	}

	/// Like [`apply_env`](Self::apply_env) with a custom variable lookup
	pub fn apply_env_with<F>(&mut self, prefix: &str, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(n) = positive_var(prefix, "ROWS_PER_PAGE", &lookup) {
			self.rows_per_page = n;
		}
		if let Some(n) = positive_var(prefix, "MAX_VISIBLE_PAGES", &lookup) {
			self.max_visible_pages = n;
		}
	}

	/// Checks the settings for values the engine cannot work with.
	///
	/// # Errors
	///
	/// Returns [`ConfError::Invalid`] for a zero page size or window, a filter
	/// on a column declared not filterable, or a select option with an empty
	/// value. A duplicated column or filter key is
	/// [`TableError::DuplicateField`].
	pub fn validate(&self) -> Result<()> {
		if self.rows_per_page == 0 {
			return Err(ConfError::Invalid(
				"rows_per_page must be greater than 0".to_string(),
			));
		}
		if self.max_visible_pages == 0 {
			return Err(ConfError::Invalid(
				"max_visible_pages must be greater than 0".to_string(),
			));
		}
		ensure_unique("column", self.columns.iter().map(|c| c.key.as_str()))?;
		ensure_unique("filter", self.filters.iter().map(|f| f.key.as_str()))?;

		let unfilterable: HashSet<&str> = self
			.columns
			.iter()
			.filter(|c| !c.filterable)
			.map(|c| c.key.as_str())
			.collect();
		for filter in &self.filters {
			if unfilterable.contains(filter.key.as_str()) {
				return Err(ConfError::Invalid(format!(
					"filter '{}' targets a column that is not filterable",
					filter.key
				)));
			}
			if filter.filter_type != FilterType::Select && !filter.options.is_empty() {
				tracing::warn!(
					key = %filter.key,
					"options are only used by select filters"
				);
			}
			if filter.options.iter().any(|o| o.value.trim().is_empty()) {
				return Err(ConfError::Invalid(format!(
					"filter '{}' has an option with an empty value",
					filter.key
				)));
			}
		}
		Ok(())
	}

	/// Builds the engine described by these settings
	pub fn engine<R>(&self) -> TableEngine<R> {
		let mut engine = TableEngine::new().with_max_visible_pages(self.max_visible_pages);

		if self.search.enabled {
			let fields: Vec<&str> = if self.search.fields.is_empty() {
				self.columns.iter().map(|c| c.key.as_str()).collect()
			} else {
				self.search.fields.iter().map(String::as_str).collect()
			};
			engine = engine.with_search(
				SearchMatcher::literal(fields).with_options(self.search.options),
			);
		}
		for column in &self.columns {
			engine = engine.with_column(column.clone());
		}
		for filter in &self.filters {
			engine = engine.with_filter(filter.clone());
		}
		if !self.status_ranking.is_empty() {
			let ranking = self
				.status_ranking
				.iter()
				.fold(StatusRanking::new(), |ranking, entry| {
					ranking.with(entry.label.as_str(), entry.rank)
				});
			engine = engine.with_status_ranking(ranking);
		}
		engine
	}

	/// Builds the state a freshly opened table starts from
	pub fn initial_state(&self) -> Result<TableState> {
		Ok(TableState::new(self.rows_per_page)?)
	}
}

fn positive_var<F>(prefix: &str, name: &str, lookup: &F) -> Option<usize>
where
	F: Fn(&str) -> Option<String>,
{
	let key = format!("{prefix}{name}");
	let raw = lookup(&key)?;
	match raw.trim().parse::<usize>() {
		Ok(n) if n > 0 => Some(n),
		_ => {
			tracing::warn!(%key, value = %raw, "ignoring non-positive or malformed setting");
			None
		}
	}
}

fn ensure_unique<'a>(what: &str, keys: impl Iterator<Item = &'a str>) -> Result<()> {
	let mut seen = HashSet::new();
	for key in keys {
		if !seen.insert(key) {
			tracing::debug!(%key, what, "duplicate key in table settings");
			return Err(TableError::DuplicateField(key.to_string()).into());
		}
	}
	Ok(())
}
