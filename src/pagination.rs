//! Page slicing and pagination-control page ranges.

pub use pasaje_pagination::*;
