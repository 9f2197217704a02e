//! Services layer (ports + adapters).
//!
//! - `ports`: contracts and data types the kernel depends on.
//! - `adapters`: implementations that do IO or run async work.

pub mod adapters;
pub mod ports;
