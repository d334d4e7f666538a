//! Rows, cell values and the shared error type.
//!
//! # Examples
//!
//! ```
//! use pasaje::core::{Record, Row, Value};
//!
//! let row = Row::new().with("asientos", 40).with("placa", "PBA-1234");
//! assert_eq!(row.field("asientos"), Value::Int(40));
//! assert_eq!(row.field("chofer"), Value::Null);
//! ```

pub use pasaje_core::*;
