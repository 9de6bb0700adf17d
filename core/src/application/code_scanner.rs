//! Scanner adapter service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use super::listeners::{Listeners, SubscriptionId};
use crate::domain::{Code, PortState};
use crate::error::{Error, Result};
use crate::ports::ScannerDriver;

/// Event-forwarding facade over a scanner driver.
///
/// Owns the driver exclusively, toggles its port, turns each completion
/// notification into a [`Code`] for subscribers, and counts reads.
///
/// # Usage Pattern
/// Create with [`CodeScanner::new`], subscribe, then `enable()`. Codes are
/// delivered synchronously on whatever thread the driver notifies from.
/// Dropping the last handle closes the port and releases the driver.
pub struct CodeScanner<D: ScannerDriver> {
    driver: Mutex<D>,
    read_count: AtomicU64,
    listeners: Listeners,
}

impl<D: ScannerDriver> CodeScanner<D> {
    /// Take ownership of `driver` and wire its completion notification.
    pub fn new(driver: D) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let mut driver = driver;
            let weak = weak.clone();
            driver.on_complete(Arc::new(move || match weak.upgrade() {
                Some(scanner) => scanner.handle_scan_complete(),
                None => Err(Error::ScannerReleased),
            }));

            Self {
                driver: Mutex::new(driver),
                read_count: AtomicU64::new(0),
                listeners: Listeners::new(),
            }
        })
    }

    // MARK: - Port Control

    /// Open the device port.
    pub fn enable(&self) -> Result<()> {
        let mut driver = self.driver.lock();
        if driver.is_port_open() {
            return Err(Error::AlreadyOpen);
        }
        driver
            .set_port_open(true)
            .map_err(|source| Error::PortOpenFailed { source })?;
        info!("scanner port opened");
        Ok(())
    }

    /// Close the device port.
    pub fn disable(&self) -> Result<()> {
        let mut driver = self.driver.lock();
        if !driver.is_port_open() {
            return Err(Error::AlreadyClosed);
        }
        driver
            .set_port_open(false)
            .map_err(|source| Error::PortCloseFailed { source })?;
        info!("scanner port closed");
        Ok(())
    }

    /// Whether the device port is open, as reported by the driver.
    pub fn is_enabled(&self) -> bool {
        self.driver.lock().is_port_open()
    }

    /// Open or close the port.
    ///
    /// Setting the current value is an error (`AlreadyOpen` /
    /// `AlreadyClosed`), not a no-op.
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        if enabled {
            self.enable()
        } else {
            self.disable()
        }
    }

    /// Current port state.
    pub fn state(&self) -> PortState {
        PortState::from_open(self.is_enabled())
    }

    /// Close the port if it is open.
    pub fn shutdown(&self) -> Result<()> {
        match self.disable() {
            Ok(()) | Err(Error::AlreadyClosed) => Ok(()),
            Err(e) => Err(e),
        }
    }

    // MARK: - Reads

    /// Number of codes successfully read so far.
    pub fn read_count(&self) -> u64 {
        self.read_count.load(Ordering::SeqCst)
    }

    /// Handle a completion notification from the driver.
    ///
    /// Reads type, length and text from the driver buffer. If all three
    /// succeed the read count is bumped and the code is dispatched to every
    /// subscriber before being returned. Any failed read aborts the scan.
    pub fn handle_scan_complete(&self) -> Result<Code> {
        let code = match self.read_code() {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "failed to read scan from driver buffer");
                return Err(e);
            }
        };

        let count = self.read_count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            code_type = code.code_type(),
            length = code.length(),
            read_count = count,
            "code scanned"
        );

        self.listeners.dispatch(&code);
        Ok(code)
    }

    fn read_code(&self) -> Result<Code> {
        let mut driver = self.driver.lock();

        let code_type = driver
            .read_type()
            .map_err(|source| Error::UnableToGetType { source })?;
        let length = driver
            .read_count()
            .map_err(|source| Error::UnableToGetLength { source })?;
        let text = driver
            .read_all()
            .map_err(|source| Error::UnableToGetContent { source })?;

        Ok(Code::new(text, length, code_type.to_string()))
    }

    // MARK: - Subscriptions

    /// Register a listener for scanned codes.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(Code) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Register an unbounded channel receiving every scanned code.
    ///
    /// Codes sent after the receiver is dropped are discarded.
    pub fn subscribe_channel(&self) -> (SubscriptionId, UnboundedReceiver<Code>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.listeners.subscribe(move |code| {
            let _ = tx.send(code);
        });
        (id, rx)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<D: ScannerDriver> Drop for CodeScanner<D> {
    fn drop(&mut self) {
        let driver = self.driver.get_mut();
        if driver.is_port_open() {
            if let Err(e) = driver.set_port_open(false) {
                warn!(error = %e, "failed to close scanner port on release");
            }
        }
        driver.release();
        debug!("scanner driver released");
    }
}

impl<D: ScannerDriver> std::fmt::Debug for CodeScanner<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeScanner")
            .field("read_count", &self.read_count())
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
