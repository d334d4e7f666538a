//! Configuration errors

use pasaje_core::TableError;
use thiserror::Error;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfError {
	/// Reading a settings file failed
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The TOML document is malformed or has the wrong shape
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The JSON document is malformed or has the wrong shape
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// The settings parsed but cannot drive a table
	#[error("Invalid settings: {0}")]
	Invalid(String),

	/// The settings file extension is neither `.toml` nor `.json`
	#[error("Unsupported settings format: {0}")]
	UnsupportedFormat(String),

	/// A table-level error, such as a duplicated key or a zero page size
	#[error(transparent)]
	Table(#[from] TableError),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_error_messages() {
		assert_eq!(
			ConfError::Invalid("rows_per_page must be greater than 0".into()).to_string(),
			"Invalid settings: rows_per_page must be greater than 0"
		);
		assert_eq!(
			ConfError::UnsupportedFormat("yaml".into()).to_string(),
			"Unsupported settings format: yaml"
		);
		let table: ConfError = TableError::InvalidPageSize(0).into();
		assert_eq!(table.to_string(), TableError::InvalidPageSize(0).to_string());
	}
}
