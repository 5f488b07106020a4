//! Millisecond timer device.
//!
//! Four consecutive read-only ports exposing a 32-bit count of milliseconds
//! elapsed since the device was built, little-endian: offset `i` reads byte
//! `i` of the counter. Stores are ignored. The counter wraps after about 49
//! days, which is outside any realistic program run.

use super::PortDevice;
use crate::ExecutionError;
use std::any::Any;
use std::time::Instant;

/// Extracts little-endian byte `index` from a 32-bit counter value.
pub(crate) fn counter_byte(millis: u32, index: u8) -> u8 {
    (millis >> (8 * index as u32)) as u8
}

/// Four-port elapsed-time counter.
pub struct Timer {
    epoch: Instant,
}

impl Timer {
    /// Creates a timer whose counter starts now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Milliseconds elapsed since construction, truncated to 32 bits.
    pub fn elapsed_millis(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl PortDevice for Timer {
    fn load(&mut self, offset: u8) -> u8 {
        counter_byte(self.elapsed_millis(), offset)
    }

    fn store(&mut self, _offset: u8, _value: u8) -> Result<(), ExecutionError> {
        // The counter is read-only; writes are silently discarded.
        Ok(())
    }

    fn size(&self) -> u8 {
        4
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
