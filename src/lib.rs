//! # pipe8 CPU Execution Engine
//!
//! An execution engine for a custom pipelined 8-bit CPU: eight registers with
//! a hard-wired-zero R0, 256 bytes of RAM, program memory of up to 1024
//! decoded instructions, a three-stage pipeline with branch-flush semantics,
//! and a 256-slot port-mapped I/O bus hosting the built-in peripherals
//! (multiplier, divider, RNG, timer, console, keyboard, RGB pixel display).
//!
//! The engine consumes an already-decoded instruction stream; assembling,
//! parsing, and label resolution belong to a front end. Rendering surfaces
//! and host key scanning likewise stay outside: the console, keyboard, and
//! display devices talk to the embedder through injected callbacks and
//! traits.
//!
//! ## Quick Start
//!
//! ```rust
//! use pipe8::{Instruction, Machine, Mnemonic, Operand, Program};
//!
//! // LDI R1, 10; LDI R2, 20; ADD R1, R1, R2; HLT
//! let program = Program::new(vec![
//!     Instruction::new(Mnemonic::Ldi, vec![Operand::Register(1), Operand::Number(10)]),
//!     Instruction::new(Mnemonic::Ldi, vec![Operand::Register(2), Operand::Number(20)]),
//!     Instruction::new(
//!         Mnemonic::Add,
//!         vec![Operand::Register(1), Operand::Register(1), Operand::Register(2)],
//!     ),
//!     Instruction::new(Mnemonic::Hlt, vec![]),
//! ])
//! .unwrap();
//!
//! let mut machine = Machine::new(program).unwrap();
//! machine.run().unwrap();
//!
//! assert_eq!(machine.cpu().register(1), 30);
//! assert!(machine.cpu().halted());
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: the CPU context, pipeline controller, and devices are
//!   separate types with narrow seams; devices hang off the port bus behind
//!   the [`PortDevice`] trait
//! - **Closed instruction set**: execution dispatches through one exhaustive
//!   match over [`Mnemonic`], built once and reviewed as a whole
//! - **Deterministic core**: no background threads and no hidden clocks; the
//!   only wall-clock reads are inside the timer device
//!
//! ## Modules
//!
//! - `constants` - architecture bounds and the standard port map
//! - `instruction` - decoded instruction model
//! - `registers`, `memory`, `cpu` - machine state
//! - `addressing` - RAM addressing modes
//! - `pipeline` - fetch/advance/execute cycle with branch flush
//! - `machine` - composition root
//! - `devices` - port bus and built-in peripherals

pub mod addressing;
pub mod constants;
pub mod cpu;
pub mod devices;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod pipeline;
pub mod registers;

// Instruction implementations (not part of the public API).
mod instructions;

// Re-export the public API.
pub use addressing::AddressingMode;
pub use cpu::{Cpu, ProgramCounter, StackPointer};
pub use devices::{BindError, PortBus, PortDevice, UnmappedPortPolicy};
pub use instruction::{Condition, Instruction, Mnemonic, Operand, UnknownMnemonic};
pub use machine::{standard_port_bus, Machine};
pub use memory::{Program, Ram};
pub use pipeline::Pipeline;
pub use registers::RegisterFile;

use thiserror::Error;

/// Fatal program errors surfaced during execution.
///
/// These indicate bugs in the loaded program or in device wiring. None are
/// recovered internally; they abort the run and leave the CPU context in the
/// state immediately preceding the failed effect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The program counter would leave program memory.
    #[error("program counter overflow: cannot advance past {pc}")]
    PcOverflow { pc: u16 },

    /// A branch or call target lies outside program memory.
    #[error("branch target {addr} outside program memory")]
    BranchOutOfRange { addr: u16 },

    /// `RET` executed with no pending call.
    #[error("return with an empty call stack")]
    EmptyCallStack,

    /// Growing the stack would push the stack pointer past 255.
    #[error("stack overflow: sp = {sp}, growing by {frame}")]
    StackOverflow { sp: u8, frame: u8 },

    /// Shrinking the stack would pull the stack pointer below 0.
    #[error("stack underflow: sp = {sp}, shrinking by {frame}")]
    StackUnderflow { sp: u8, frame: u8 },

    /// Fetch ran past the end of the loaded program.
    #[error("instruction fetch at {pc} past end of program (length {len})")]
    FetchOutOfBounds { pc: u16, len: u16 },

    /// The decoded instruction stream exceeds program memory capacity.
    #[error("program of {len} instructions exceeds the 1024-instruction capacity")]
    ProgramTooLong { len: usize },

    /// A port instruction touched a port with no bound device.
    #[error("no device bound to port {port}")]
    UnmappedPort { port: u16 },

    /// A pixel commit targeted coordinates outside the display.
    #[error("pixel coordinate ({x}, {y}) outside the display")]
    PixelOutOfRange { x: u8, y: u8 },

    /// A condition code operand was not one of the four defined codes.
    #[error("invalid condition code {code}")]
    InvalidCondition { code: u8 },

    /// An operand was missing or of the wrong kind for its mnemonic.
    #[error("{mnemonic}: operand {index} missing or of the wrong kind")]
    OperandMismatch { mnemonic: Mnemonic, index: usize },
}
