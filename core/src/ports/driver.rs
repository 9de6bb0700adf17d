//! Scanner driver port (interface).

use std::sync::Arc;

use crate::domain::Code;
use crate::error::{DriverError, Result};

/// Callback the driver invokes when scan data is ready.
///
/// The returned value is the outcome of the adapter's handling of that scan,
/// handed back to whatever driver context delivered the notification.
pub type CompletionHandler = Arc<dyn Fn() -> Result<Code> + Send + Sync>;

/// Port for the scanner hardware driver.
///
/// This trait stands in for the vendor driver object. Implementations own
/// the device handle; the adapter owns the implementation exclusively.
///
/// Implementations must not call the completion handler from inside one of
/// their own methods: the adapter holds its driver lock while calling them.
pub trait ScannerDriver: Send + 'static {
    /// Whether the device port is currently open.
    fn is_port_open(&self) -> bool;

    /// Open (`true`) or close (`false`) the device port.
    fn set_port_open(&mut self, open: bool) -> std::result::Result<(), DriverError>;

    /// Read the code type indicator of the buffered scan.
    fn read_type(&mut self) -> std::result::Result<char, DriverError>;

    /// Read the byte count of the buffered scan.
    fn read_count(&mut self) -> std::result::Result<usize, DriverError>;

    /// Read the full decoded text of the buffered scan.
    fn read_all(&mut self) -> std::result::Result<String, DriverError>;

    /// Register the handler fired when scan data is ready.
    ///
    /// A later registration replaces the earlier one.
    fn on_complete(&mut self, handler: CompletionHandler);

    /// Release native resources held by the driver.
    fn release(&mut self) {}
}
