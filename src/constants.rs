//! # Architecture Constants
//!
//! Fixed bounds of the machine and the standard port map. These values are the
//! single source of truth for every size check in the crate; nothing else
//! hard-codes a bound.

/// Number of registers in the register file (R0 through R7).
pub const NUM_REGISTERS: usize = 8;

/// Size of data RAM in bytes. RAM is byte-addressed with an 8-bit index.
pub const RAM_SIZE: usize = 256;

/// Maximum number of decoded instructions program memory can hold.
///
/// The program counter is a 10-bit value; addresses range over
/// `0..MAX_PROGRAM_SIZE`.
pub const MAX_PROGRAM_SIZE: usize = 1024;

/// Depth of the instruction pipeline in stages.
pub const INSTRUCTION_PIPELINE_SIZE: usize = 3;

/// Number of addressable I/O port slots.
pub const NUM_PORTS: usize = 256;

/// Width of the pixel display in pixels.
pub const DISPLAY_WIDTH: u8 = 128;

/// Height of the pixel display in pixels.
pub const DISPLAY_HEIGHT: u8 = 128;

// Standard hardware port assignments. Multi-slot devices occupy consecutive
// ports starting at their base.

/// Multiplier base port (2 slots: product low, product high).
pub const MULTIPLIER_BASE_PORT: u8 = 0;

/// Divider base port (2 slots: divisor/quotient, dividend/remainder).
pub const DIVIDER_BASE_PORT: u8 = 2;

/// Random number generator port (1 slot).
pub const RNG_PORT: u8 = 4;

/// Timer base port (4 slots: little-endian bytes of the millisecond counter).
pub const TIMER_BASE_PORT: u8 = 5;

/// Pixel display base port (5 slots: red, green, blue, x, y).
pub const DISPLAY_BASE_PORT: u8 = 11;

/// Console output port (1 slot, write-only).
pub const CONSOLE_PORT: u8 = 32;

/// Keyboard port (1 slot), bound only when a key poller is configured.
pub const KEYBOARD_PORT: u8 = 33;
