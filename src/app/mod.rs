//! Application layer: wires the store to the async runtime.

pub mod workbench;

pub use workbench::{Workbench, WorkbenchError};
