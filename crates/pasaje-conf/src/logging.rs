//! Logging setup
//!
//! The table crates only emit `tracing` events. Applications that want to see
//! them install a subscriber once at startup through [`LoggingSettings::init`].

use crate::error::{ConfError, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Filter directive used when `RUST_LOG` is unset (for example `"info"` or
	/// `"warn,pasaje_tables=debug"`)
	pub level: String,
	/// Whether events show their target module
	pub with_target: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			with_target: false,
		}
	}
}

impl LoggingSettings {
	/// Creates settings with the given default directive
	pub fn new(level: impl Into<String>) -> Self {
		Self {
			level: level.into(),
			..Self::default()
		}
	}

	/// Builder-style setter for `with_target`
	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	/// Builds the event filter; `RUST_LOG` takes precedence over `level`
	pub fn env_filter(&self) -> Result<EnvFilter> {
		if let Ok(filter) = EnvFilter::try_from_default_env() {
			return Ok(filter);
		}
		EnvFilter::try_new(&self.level)
			.map_err(|e| ConfError::Invalid(format!("invalid log level '{}': {e}", self.level)))
	}

	/// Installs a global fmt subscriber.
	///
	/// # Errors
	///
	/// Returns [`ConfError::Invalid`] if `level` is not a valid filter
	/// directive or a global subscriber is already installed.
	pub fn init(&self) -> Result<()> {
		let filter = self.env_filter()?;
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_target(self.with_target)
			.try_init()
			.map_err(|e| ConfError::Invalid(format!("logging already initialised: {e}")))
	}
}
