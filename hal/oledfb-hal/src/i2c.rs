//! I2C transport abstractions
//!
//! The display is written to with short addressed write transactions. Each
//! transaction carries its own timeout so a caller can bound every blocking
//! bus operation without the driver owning a clock.

/// Upper bound on how long a single transaction may block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    millis: u32,
}

impl Timeout {
    /// Timeout used by the reference panel setup
    pub const DEFAULT: Self = Self::from_millis(500);

    /// Create a timeout from milliseconds
    pub const fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    /// Timeout in milliseconds
    pub const fn as_millis(&self) -> u32 {
        self.millis
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single addressed write on the bus
///
/// The bytes include the controller's control byte; the transport sends
/// them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transaction<'a> {
    /// 7-bit device address
    pub address: u8,
    /// Bytes to write
    pub bytes: &'a [u8],
    /// How long the transport may block before giving up
    pub timeout: Timeout,
}

impl<'a> Transaction<'a> {
    /// Create a new write transaction
    pub const fn new(address: u8, bytes: &'a [u8], timeout: Timeout) -> Self {
        Self {
            address,
            bytes,
            timeout,
        }
    }

    /// Number of bytes in the transaction
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if there is nothing to send
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Byte transport to the display controller
///
/// Implementations block until the transaction is acknowledged, fails, or
/// its timeout expires. No retry happens at this layer.
pub trait Transport {
    /// Error type for bus operations (NACK, timeout, arbitration loss, ...)
    type Error;

    /// Execute one write transaction
    fn execute(&mut self, transaction: &Transaction<'_>) -> Result<(), Self::Error>;

    /// Convenience wrapper building the transaction in place
    fn write(&mut self, address: u8, bytes: &[u8], timeout: Timeout) -> Result<(), Self::Error> {
        self.execute(&Transaction::new(address, bytes, timeout))
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn execute(&mut self, transaction: &Transaction<'_>) -> Result<(), Self::Error> {
        (**self).execute(transaction)
    }
}
