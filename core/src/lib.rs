//! CodeScanner Core Library
//!
//! Event-forwarding adapter over a barcode/2D-code scanner driver.
//! Provides functionality to:
//! - Open and close the scanner port
//! - Turn the driver's "data ready" notification into typed `Code` events
//! - Count successful reads
//! - Manage session configuration
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure value types
//! - `ports`: Trait definitions (interfaces), including `ScannerDriver`
//! - `adapters`: Driver implementations (`SimulatedDriver`)
//! - `application`: The `CodeScanner` service
//!
//! # Example
//! ```
//! use codescanner_core::{CodeScanner, SimulatedDriver};
//!
//! let device = SimulatedDriver::new();
//! let scanner = CodeScanner::new(device.clone());
//! scanner.subscribe(|code| println!("{}", code));
//!
//! scanner.enable().unwrap();
//! device.scan('A', "12345").unwrap();
//! assert_eq!(scanner.read_count(), 1);
//! ```

// Hexagonal architecture layers
pub mod domain;
pub mod ports;
pub mod adapters;
pub mod application;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{Code, PortState, ReadStage};

// Re-export other commonly used types
pub use adapters::{parse_scan_line, SimulatedDriver};
pub use application::{CodeScanner, SubscriptionId};
pub use config::{Config, ConfigStore};
pub use error::{DriverError, Error, Result};
pub use ports::{CompletionHandler, ConfigRepository, ScannerDriver};
