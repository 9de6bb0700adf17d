//! Application layer - Use case services.
//!
//! This module contains the scanner adapter service, which orchestrates
//! driver interactions and publishes domain types to subscribers.
//!
//! Services are designed to be thin orchestrators that:
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

mod code_scanner;
mod listeners;

pub use code_scanner::CodeScanner;
pub use listeners::{CodeListener, Listeners, SubscriptionId};
