//! Cell values
//!
//! Rows coming from the REST backend are heterogeneous: the same table can hold
//! numbers, strings, booleans and nulls under keys that are only known at
//! runtime. `Value` is the tagged union every filter, search and sort stage
//! reads through.

use crate::temporal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value.
///
/// JSON strings always decode to [`Value::Text`]; date semantics are applied
/// lazily by the stages that need them (see [`Value::as_date`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Missing or explicit null
	#[default]
	Null,
	/// Boolean flag
	Bool(bool),
	/// Integral number
	Int(i64),
	/// Floating-point number
	Float(f64),
	/// Free text
	Text(String),
	/// Calendar date
	Date(NaiveDate),
	/// Date with time of day
	DateTime(NaiveDateTime),
}

impl Value {
	/// Returns true for [`Value::Null`]
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Stringifies the value the way the table UI displays it.
	///
	/// Nulls become the empty string so that a missing field never matches a
	/// non-empty query and never breaks a comparison.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_core::Value;
	///
	/// assert_eq!(Value::Null.to_text(), "");
	/// assert_eq!(Value::Float(30.0).to_text(), "30");
	/// assert_eq!(Value::Float(12.5).to_text(), "12.5");
	/// assert_eq!(Value::Bool(true).to_text(), "true");
	/// ```
	pub fn to_text(&self) -> String {
		match self {
			Self::Null => String::new(),
			Self::Bool(b) => b.to_string(),
			Self::Int(i) => i.to_string(),
			Self::Float(f) => format_float(*f),
			Self::Text(s) => s.clone(),
			Self::Date(d) => d.format("%Y-%m-%d").to_string(),
			Self::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
		}
	}

	/// Coerces the value to a float; anything non-numeric is `0.0`.
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_core::Value;
	///
	/// assert_eq!(Value::Text(" 42.5 ".into()).to_number(), 42.5);
	/// assert_eq!(Value::Text("n/a".into()).to_number(), 0.0);
	/// assert_eq!(Value::Null.to_number(), 0.0);
	/// ```
	pub fn to_number(&self) -> f64 {
		let n = match self {
			Self::Null | Self::Date(_) | Self::DateTime(_) => 0.0,
			Self::Bool(b) => {
				if *b {
					1.0
				} else {
					0.0
				}
			}
			Self::Int(i) => *i as f64,
			Self::Float(f) => *f,
			Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
		};
		if n.is_nan() { 0.0 } else { n }
	}

	/// Interprets the value as a calendar date, if it is one.
	pub fn as_date(&self) -> Option<NaiveDate> {
		match self {
			Self::Date(d) => Some(*d),
			Self::DateTime(dt) => Some(dt.date()),
			Self::Text(s) => temporal::parse_date(s),
			_ => None,
		}
	}

	/// Returns the boolean if this is a [`Value::Bool`]
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}
}

fn format_float(f: f64) -> String {
	if f.is_infinite() {
		if f.is_sign_positive() {
			"Infinity".to_string()
		} else {
			"-Infinity".to_string()
		}
	} else {
		// Display already prints integral floats without a fractional part
		f.to_string()
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_text())
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					Self::Int(i)
				} else {
					Self::Float(n.as_f64().unwrap_or(0.0))
				}
			}
			serde_json::Value::String(s) => Self::Text(s),
			// Nested structures are only ever searched as text
			other => Self::Text(other.to_string()),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<NaiveDate> for Value {
	fn from(value: NaiveDate) -> Self {
		Self::Date(value)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(value: NaiveDateTime) -> Self {
		Self::DateTime(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Self::Null)
	}
}
