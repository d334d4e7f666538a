//! # Pasaje Conf
//!
//! Settings for pasaje tables: declarative [`TableSettings`] loaded from TOML
//! or JSON with environment overrides, and [`LoggingSettings`] to install a
//! `tracing` subscriber.
//!
//! ```
//! use pasaje_conf::TableSettings;
//! use pasaje_core::Row;
//!
//! let mut settings = TableSettings::from_json_str(
//!     r#"{"name": "boletos", "columns": [{"key": "codigo", "header": "Código"}]}"#,
//! ).unwrap();
//! settings.apply_env("PASAJE_BOLETOS_");
//!
//! let engine = settings.engine::<Row>();
//! let state = settings.initial_state().unwrap();
//! assert_eq!(engine.columns().len(), 1);
//! assert_eq!(state.current_page, 1);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{ConfError, Result};
pub use logging::LoggingSettings;
pub use settings::{ColumnSettings, SearchSettings, StatusRankSetting, TableSettings};
