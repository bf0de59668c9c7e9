//! `embedded-hal` I2C adapter
//!
//! Wraps any blocking [`embedded_hal::i2c::I2c`] bus as a [`Transport`].
//! The per-transaction timeout is not enforced here: `embedded-hal` has no
//! way to pass one, so the bus peripheral's own timeout configuration
//! applies.

use embedded_hal::i2c::I2c;
use oledfb_hal::{Transaction, Transport};

/// Blocking I2C transport
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> I2cTransport<I2C> {
    /// Wrap a bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = I2C::Error;

    fn execute(&mut self, transaction: &Transaction<'_>) -> Result<(), Self::Error> {
        if transaction.is_empty() {
            return Ok(());
        }
        self.i2c.write(transaction.address, transaction.bytes)
    }
}
