//! Domain layer - Pure value types.
//!
//! This module contains the values the scanner adapter produces and reasons
//! about. These types have no I/O dependencies and can be tested in isolation.

mod code;
mod state;

// Re-export all domain types
pub use code::Code;
pub use state::{PortState, ReadStage};
