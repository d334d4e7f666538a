//! Table settings and logging initialisation.
//!
//! Only available with the `conf` feature (enabled by default).

pub use pasaje_conf::*;
