//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Hardware bindings for a concrete vendor driver implement `ScannerDriver`
//! the same way `SimulatedDriver` does.

pub mod simulated;

// Re-export main types for convenience
pub use simulated::{parse_scan_line, SimulatedDriver};
