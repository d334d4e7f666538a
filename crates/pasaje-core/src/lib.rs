//! # Pasaje Core
//!
//! Row model shared by every pasaje table crate.
//!
//! - [`Value`]: tagged union for heterogeneous cell values
//! - [`Row`] / [`Record`]: dynamic rows and the field-access trait typed rows implement
//! - [`temporal`]: date/time normalisation used by date and time filters
//! - [`TableError`]: construction-time errors

#![warn(missing_docs)]

pub mod error;
pub mod record;
pub mod temporal;
pub mod value;

pub use error::{Result, TableError};
pub use record::{Record, Row, rows_from_json};
pub use value::Value;
