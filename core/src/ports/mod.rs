//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod config;
mod driver;

pub use config::ConfigRepository;
pub use driver::{CompletionHandler, ScannerDriver};
