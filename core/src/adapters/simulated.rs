//! In-memory scanner driver.
//!
//! Plays the device side of the `ScannerDriver` port without hardware:
//! the caller keeps a clone of the driver and pushes scans into it, and can
//! make individual buffer reads or port calls fail.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{Code, ReadStage};
use crate::error::{DriverError, Result};
use crate::ports::{CompletionHandler, ScannerDriver};

/// Scan data waiting to be read.
#[derive(Debug, Clone)]
struct Buffered {
    code_type: char,
    text: String,
}

#[derive(Default)]
struct State {
    port_open: bool,
    buffer: Option<Buffered>,
    failing_stages: HashSet<ReadStage>,
    reject_open: bool,
    reject_close: bool,
    released: bool,
    handler: Option<CompletionHandler>,
}

impl State {
    fn take_fault(&mut self, stage: ReadStage) -> std::result::Result<(), DriverError> {
        if self.failing_stages.remove(&stage) {
            return Err(DriverError::Rejected(format!(
                "simulated {} read failure",
                stage
            )));
        }
        Ok(())
    }

    fn buffered(&self) -> std::result::Result<&Buffered, DriverError> {
        self.buffer.as_ref().ok_or(DriverError::BufferEmpty)
    }
}

/// Simulated scanner device.
///
/// Clones share the same device state.
#[derive(Clone, Default)]
pub struct SimulatedDriver {
    state: Arc<Mutex<State>>,
}

impl SimulatedDriver {
    /// Create a driver with the port closed and an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a scan: load the buffer and fire the completion handler.
    ///
    /// Scans arriving while the port is closed are dropped and yield
    /// `Ok(None)`, as does a scan with no handler registered.
    pub fn scan(&self, code_type: char, text: impl Into<String>) -> Result<Option<Code>> {
        let text = text.into();
        {
            let mut state = self.state.lock();
            if !state.port_open {
                debug!(%code_type, %text, "port closed, dropping simulated scan");
                return Ok(None);
            }
            state.buffer = Some(Buffered { code_type, text });
        }
        self.notify()
    }

    /// Fire the completion handler without touching the buffer.
    pub fn notify(&self) -> Result<Option<Code>> {
        // Clone out of the lock; the handler reads back through the driver.
        let handler = self.state.lock().handler.clone();
        match handler {
            Some(handler) => handler().map(Some),
            None => Ok(None),
        }
    }

    /// Make the next read at `stage` fail once.
    pub fn fail_next_read(&self, stage: ReadStage) {
        self.state.lock().failing_stages.insert(stage);
    }

    /// Make port open requests fail while `reject` is set.
    pub fn reject_open(&self, reject: bool) {
        self.state.lock().reject_open = reject;
    }

    /// Make port close requests fail while `reject` is set.
    pub fn reject_close(&self, reject: bool) {
        self.state.lock().reject_close = reject;
    }

    /// Whether a completion handler is registered.
    pub fn has_handler(&self) -> bool {
        self.state.lock().handler.is_some()
    }

    /// Whether `release` has been called.
    pub fn is_released(&self) -> bool {
        self.state.lock().released
    }

    /// Whether scan data is waiting in the buffer.
    pub fn has_buffered_data(&self) -> bool {
        self.state.lock().buffer.is_some()
    }
}

impl std::fmt::Debug for SimulatedDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SimulatedDriver")
            .field("port_open", &state.port_open)
            .field("buffered", &state.buffer.is_some())
            .field("released", &state.released)
            .finish()
    }
}

impl ScannerDriver for SimulatedDriver {
    fn is_port_open(&self) -> bool {
        self.state.lock().port_open
    }

    fn set_port_open(&mut self, open: bool) -> std::result::Result<(), DriverError> {
        let mut state = self.state.lock();
        if state.released {
            return Err(DriverError::Disposed);
        }
        if open && state.reject_open {
            return Err(DriverError::Rejected("port open refused".to_string()));
        }
        if !open && state.reject_close {
            return Err(DriverError::Rejected("port close refused".to_string()));
        }
        state.port_open = open;
        if !open {
            state.buffer = None;
        }
        Ok(())
    }

    fn read_type(&mut self) -> std::result::Result<char, DriverError> {
        let mut state = self.state.lock();
        state.take_fault(ReadStage::Type)?;
        Ok(state.buffered()?.code_type)
    }

    fn read_count(&mut self) -> std::result::Result<usize, DriverError> {
        let mut state = self.state.lock();
        state.take_fault(ReadStage::Length)?;
        Ok(state.buffered()?.text.len())
    }

    fn read_all(&mut self) -> std::result::Result<String, DriverError> {
        let mut state = self.state.lock();
        state.take_fault(ReadStage::Content)?;
        state
            .buffer
            .take()
            .map(|b| b.text)
            .ok_or(DriverError::BufferEmpty)
    }

    fn on_complete(&mut self, handler: CompletionHandler) {
        self.state.lock().handler = Some(handler);
    }

    fn release(&mut self) {
        let mut state = self.state.lock();
        state.released = true;
        state.port_open = false;
        state.buffer = None;
        state.handler = None;
    }
}

/// Parse a text line into a simulated scan.
///
/// `"B:4901234567894"` becomes `('B', "4901234567894")` with `:` as
/// separator. Lines without a one-character type prefix take
/// `default_type`. Blank lines yield `None`.
pub fn parse_scan_line(line: &str, default_type: char, separator: char) -> Option<(char, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(code_type), Some(sep)) if sep == separator => {
            Some((code_type, chars.as_str().to_string()))
        }
        _ => Some((default_type, line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_peek_then_drain() {
        let mut driver = SimulatedDriver::new();
        driver.set_port_open(true).unwrap();
        driver.scan('A', "12345").unwrap();

        assert_eq!(driver.read_type().unwrap(), 'A');
        assert_eq!(driver.read_count().unwrap(), 5);
        assert_eq!(driver.read_type().unwrap(), 'A');
        assert_eq!(driver.read_all().unwrap(), "12345");
        assert!(!driver.has_buffered_data());
        assert!(matches!(driver.read_all(), Err(DriverError::BufferEmpty)));
    }

    #[test]
    fn test_count_is_byte_length() {
        let mut driver = SimulatedDriver::new();
        driver.set_port_open(true).unwrap();
        driver.scan('Q', "é").unwrap();
        assert_eq!(driver.read_count().unwrap(), 2);
    }

    #[test]
    fn test_scan_dropped_while_closed() {
        let driver = SimulatedDriver::new();
        assert!(driver.scan('A', "12345").unwrap().is_none());
        assert!(!driver.has_buffered_data());
    }

    #[test]
    fn test_fault_fires_once() {
        let mut driver = SimulatedDriver::new();
        driver.set_port_open(true).unwrap();
        driver.scan('A', "1").unwrap();
        driver.fail_next_read(ReadStage::Length);

        assert!(matches!(driver.read_count(), Err(DriverError::Rejected(_))));
        assert_eq!(driver.read_count().unwrap(), 1);
    }

    #[test]
    fn test_rejected_port_calls() {
        let mut driver = SimulatedDriver::new();
        driver.reject_open(true);
        assert!(driver.set_port_open(true).is_err());
        assert!(!driver.is_port_open());

        driver.reject_open(false);
        driver.set_port_open(true).unwrap();
        driver.reject_close(true);
        assert!(driver.set_port_open(false).is_err());
        assert!(driver.is_port_open());
    }

    #[test]
    fn test_release() {
        let mut driver = SimulatedDriver::new();
        driver.set_port_open(true).unwrap();
        driver.release();
        assert!(driver.is_released());
        assert!(!driver.is_port_open());
        assert!(matches!(
            driver.set_port_open(true),
            Err(DriverError::Disposed)
        ));
    }

    #[test]
    fn test_parse_scan_line() {
        assert_eq!(
            parse_scan_line("B:4901234567894", 'A', ':'),
            Some(('B', "4901234567894".to_string()))
        );
        assert_eq!(
            parse_scan_line("12345\n", 'A', ':'),
            Some(('A', "12345".to_string()))
        );
        assert_eq!(
            parse_scan_line("Q|https://example.com/a:b", 'A', '|'),
            Some(('Q', "https://example.com/a:b".to_string()))
        );
        assert_eq!(parse_scan_line("   ", 'A', ':'), None);
    }
}
