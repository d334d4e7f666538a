//! The search, filter, sort and paginate pipeline.
//!
//! See [`pasaje_tables`] for the architecture overview.

pub use pasaje_tables::*;
