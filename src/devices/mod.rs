//! # Port-Mapped Device Support
//!
//! The machine talks to its peripherals through 256 addressable port slots.
//! Each slot is either empty or bound to exactly one device; a device may own
//! several consecutive slots (the multiplier owns two, the timer four, the
//! display five) and receives a slot *offset* rather than an absolute port
//! number, which keeps its internal state independent of where it is mapped
//! and lets sibling ports share one backing struct without back-pointers.
//!
//! # Architecture
//!
//! - **PortDevice trait**: the `{store, load}` contract every device
//!   implements, plus downcast support for test hooks
//! - **PortBus**: routes port reads/writes to the bound device, with overlap
//!   detection at bind time and a configurable policy for unmapped ports
//! - **Device implementations**: multiplier, divider, RNG, timer, console,
//!   keyboard, pixel display
//!
//! # Example
//!
//! ```
//! use pipe8::{PortBus, devices::Multiplier};
//!
//! let mut bus = PortBus::new();
//! bus.try_bind(0, Box::new(Multiplier::new())).unwrap();
//!
//! bus.write(0, 6).unwrap();
//! bus.write(1, 7).unwrap();
//! assert_eq!(bus.read(0).unwrap(), 42);
//! ```

use crate::ExecutionError;
use std::any::Any;
use thiserror::Error;

pub mod console;
pub mod display;
pub mod divider;
pub mod keyboard;
pub mod multiplier;
pub mod rng;
pub mod timer;

pub use console::Console;
pub use display::PixelDisplay;
pub use divider::Divider;
pub use keyboard::{KeyPoller, Keyboard};
pub use multiplier::Multiplier;
pub use rng::RandomSource;
pub use timer::Timer;

/// Contract for a port-mapped device.
///
/// `load` and `store` receive the offset of the accessed slot relative to the
/// device's base port (0 to `size() - 1`). Both run synchronously on the
/// executor thread and complete before returning; a device that forwards work
/// elsewhere owns its own synchronization.
///
/// `load` takes `&mut self` because several devices mutate on read (the
/// keyboard dequeues, the RNG advances its generator).
pub trait PortDevice {
    /// Reads the byte visible at `offset`.
    fn load(&mut self, offset: u8) -> u8;

    /// Writes `value` to the slot at `offset`.
    ///
    /// Most devices cannot fail; the pixel display reports out-of-range
    /// coordinates as a fatal execution error.
    fn store(&mut self, offset: u8, value: u8) -> Result<(), ExecutionError>;

    /// Number of consecutive port slots this device occupies.
    fn size(&self) -> u8 {
        1
    }

    /// Downcast support, so callers can reach device-specific methods after
    /// registration (e.g. reading pixels back from the display in tests).
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Error returned when binding a device to the port bus fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The requested slot range overlaps a previously bound device.
    #[error(
        "ports 0x{new_base:02X}..=0x{new_end:02X} overlap device bound at 0x{existing_base:02X}..=0x{existing_end:02X}"
    )]
    Overlap {
        new_base: u8,
        new_end: u8,
        existing_base: u8,
        existing_end: u8,
    },
    /// The device's slot range would run past port 255.
    #[error("device at port 0x{base:02X} with {size} slots leaves the port space")]
    OutOfRange { base: u8, size: u8 },
}

/// What the bus does when an instruction touches a port with no device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedPortPolicy {
    /// Loads and stores to unmapped ports are fatal.
    #[default]
    Strict,
    /// Loads return 0 and stores are ignored, uniformly.
    Permissive,
}

struct PortBinding {
    base: u8,
    device: Box<dyn PortDevice>,
}

impl PortBinding {
    /// Inclusive end of the bound slot range.
    fn end(&self) -> u8 {
        self.base + (self.device.size() - 1)
    }

    fn contains(&self, port: u8) -> bool {
        port >= self.base && port <= self.end()
    }
}

/// Routes port accesses to bound devices.
///
/// Bindings are established while the machine is built and are immutable for
/// the rest of the run; there is no unbind operation.
pub struct PortBus {
    bindings: Vec<PortBinding>,
    policy: UnmappedPortPolicy,
}

impl PortBus {
    /// Creates an empty bus with the strict unmapped-port policy.
    pub fn new() -> Self {
        Self::with_policy(UnmappedPortPolicy::Strict)
    }

    /// Creates an empty bus with an explicit unmapped-port policy.
    pub fn with_policy(policy: UnmappedPortPolicy) -> Self {
        Self {
            bindings: Vec::new(),
            policy,
        }
    }

    /// The configured unmapped-port policy.
    pub fn policy(&self) -> UnmappedPortPolicy {
        self.policy
    }

    /// Binds `device` to the `device.size()` consecutive slots starting at
    /// `base`. Succeeds only if every slot in the range is empty.
    ///
    /// # Errors
    ///
    /// [`BindError::Overlap`] if the range collides with an existing binding,
    /// [`BindError::OutOfRange`] if it would run past port 255.
    #[must_use = "ignoring bind errors leaves the device unmapped"]
    pub fn try_bind(&mut self, base: u8, device: Box<dyn PortDevice>) -> Result<(), BindError> {
        let size = device.size();
        debug_assert!(size >= 1, "a device must occupy at least one slot");
        let end = match base.checked_add(size - 1) {
            Some(end) => end,
            None => return Err(BindError::OutOfRange { base, size }),
        };

        for existing in &self.bindings {
            if base <= existing.end() && end >= existing.base {
                return Err(BindError::Overlap {
                    new_base: base,
                    new_end: end,
                    existing_base: existing.base,
                    existing_end: existing.end(),
                });
            }
        }

        self.bindings.push(PortBinding { base, device });
        Ok(())
    }

    fn find(&mut self, port: u8) -> Option<(&mut (dyn PortDevice + '_), u8)> {
        self.bindings
            .iter_mut()
            .find(|b| b.contains(port))
            .map(move |b| (&mut *b.device as &mut dyn PortDevice, port - b.base))
    }

    /// True if some device is bound at `port`.
    pub fn is_mapped(&self, port: u8) -> bool {
        self.bindings.iter().any(|b| b.contains(port))
    }

    /// Fails under the strict policy when `port` is unmapped. Used by
    /// instructions that must validate several ports before mutating any
    /// device.
    pub(crate) fn check_mapped(&self, port: u8) -> Result<(), ExecutionError> {
        match self.policy {
            UnmappedPortPolicy::Strict if !self.is_mapped(port) => {
                Err(ExecutionError::UnmappedPort { port: port as u16 })
            }
            _ => Ok(()),
        }
    }

    /// Reads from `port` by delegating to the bound device.
    ///
    /// # Errors
    ///
    /// [`ExecutionError::UnmappedPort`] under the strict policy when no
    /// device is bound; the permissive policy reads 0 instead.
    pub fn read(&mut self, port: u8) -> Result<u8, ExecutionError> {
        match self.find(port) {
            Some((device, offset)) => Ok(device.load(offset)),
            None => match self.policy {
                UnmappedPortPolicy::Strict => {
                    Err(ExecutionError::UnmappedPort { port: port as u16 })
                }
                UnmappedPortPolicy::Permissive => Ok(0),
            },
        }
    }

    /// Writes `value` to `port` by delegating to the bound device.
    ///
    /// # Errors
    ///
    /// [`ExecutionError::UnmappedPort`] under the strict policy when no
    /// device is bound (the permissive policy drops the write), or whatever
    /// the device itself reports.
    pub fn write(&mut self, port: u8, value: u8) -> Result<(), ExecutionError> {
        match self.find(port) {
            Some((device, offset)) => device.store(offset, value),
            None => match self.policy {
                UnmappedPortPolicy::Strict => {
                    Err(ExecutionError::UnmappedPort { port: port as u16 })
                }
                UnmappedPortPolicy::Permissive => Ok(()),
            },
        }
    }

    /// Returns the device mapped at `port`, downcast to its concrete type.
    pub fn device_at<T: PortDevice + 'static>(&self, port: u8) -> Option<&T> {
        self.bindings
            .iter()
            .find(|b| b.contains(port))
            .and_then(|b| b.device.as_any().downcast_ref::<T>())
    }

    /// Returns the device mapped at `port`, downcast mutably.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipe8::{PortBus, devices::Console};
    ///
    /// let mut bus = PortBus::new();
    /// bus.try_bind(32, Box::new(Console::new())).unwrap();
    ///
    /// if let Some(console) = bus.device_at_mut::<Console>(32) {
    ///     console.set_write_callback(|byte| print!("{}", byte as char));
    /// }
    /// ```
    pub fn device_at_mut<T: PortDevice + 'static>(&mut self, port: u8) -> Option<&mut T> {
        self.bindings
            .iter_mut()
            .find(|b| b.contains(port))
            .and_then(|b| b.device.as_any_mut().downcast_mut::<T>())
    }
}

impl Default for PortBus {
    fn default() -> Self {
        Self::new()
    }
}
