//! Rows and the `Record` trait
//!
//! Every table stage reads fields through [`Record::field`]. Dynamic rows
//! decoded from REST responses use [`Row`]; tables with a fixed schema can
//! implement `Record` on their own structs instead.

use crate::error::{Result, TableError};
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read access to the fields of a table row.
///
/// Missing fields must resolve to [`Value::Null`], never panic.
///
/// # Examples
///
/// ```
/// use pasaje_core::{Record, Value};
///
/// struct Bus {
///     unidad: u32,
///     estado: &'static str,
/// }
///
/// impl Record for Bus {
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "unidad" => self.unidad.into(),
///             "estado" => self.estado.into(),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let bus = Bus { unidad: 12, estado: "Activo" };
/// assert_eq!(bus.field("unidad"), Value::Int(12));
/// assert!(bus.field("placa").is_null());
/// ```
pub trait Record {
	/// Returns the value stored under `key`
	fn field(&self, key: &str) -> Value;

	/// Returns the stringified value stored under `key`
	fn field_text(&self, key: &str) -> String {
		self.field(key).to_text()
	}
}

impl<T: Record + ?Sized> Record for &T {
	fn field(&self, key: &str) -> Value {
		(**self).field(key)
	}
}

/// An open-ended key/value row, in field insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
	fields: IndexMap<String, Value>,
}

impl Row {
	/// Creates an empty row
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_core::{Record, Row, Value};
	///
	/// let row = Row::new().with("capacidad", "30").with("activo", true);
	/// assert_eq!(row.field("capacidad"), Value::Text("30".into()));
	/// assert_eq!(row.len(), 2);
	/// ```
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	/// Inserts or replaces a field, returning the previous value
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.fields.insert(key.into(), value.into())
	}

	/// Borrows the value under `key`, if present
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}

	/// Number of fields
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if the row has no fields
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Iterates over fields in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Decodes a row from a JSON object.
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidRow`] if `json` is not an object.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_core::{Record, Row, Value};
	/// use serde_json::json;
	///
	/// let row = Row::from_json(json!({"nombre": "Juan", "edad": 31})).unwrap();
	/// assert_eq!(row.field("edad"), Value::Int(31));
	///
	/// assert!(Row::from_json(json!([1, 2, 3])).is_err());
	/// ```
	pub fn from_json(json: serde_json::Value) -> Result<Self> {
		match json {
			serde_json::Value::Object(map) => Ok(map
				.into_iter()
				.map(|(k, v)| (k, Value::from(v)))
				.collect()),
			other => Err(TableError::InvalidRow(format!(
				"expected a JSON object, found {}",
				json_kind(&other)
			))),
		}
	}
}

impl Record for Row {
	fn field(&self, key: &str) -> Value {
		self.fields.get(key).cloned().unwrap_or(Value::Null)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			fields: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// Decodes a list of rows from a JSON array of objects.
///
/// # Errors
///
/// Returns [`TableError::InvalidRow`] if `json` is not an array, or if any
/// element is not an object.
pub fn rows_from_json(json: serde_json::Value) -> Result<Vec<Row>> {
	match json {
		serde_json::Value::Array(items) => items.into_iter().map(Row::from_json).collect(),
		other => Err(TableError::InvalidRow(format!(
			"expected a JSON array of rows, found {}",
			json_kind(&other)
		))),
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "a boolean",
		serde_json::Value::Number(_) => "a number",
		serde_json::Value::String(_) => "a string",
		serde_json::Value::Array(_) => "an array",
		serde_json::Value::Object(_) => "an object",
	}
}
