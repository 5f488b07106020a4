//! # Machine Composition
//!
//! [`Machine`] assembles one runnable system: a CPU context wired to the
//! standard hardware and a pipeline controller holding the program. It is the
//! intended entry point for embedders and for whole-program tests.
//!
//! ## Standard port map
//!
//! | Ports | Device |
//! |-------|--------|
//! | 0-1 | multiplier |
//! | 2-3 | divider |
//! | 4 | random source |
//! | 5-8 | timer |
//! | 11-15 | pixel display |
//! | 32 | console |
//! | 33 | keyboard, bound by the embedder when a poller exists |
//!
//! The console sink, keyboard poller, and display observer are capabilities
//! the embedder injects; see the device constructors and
//! [`PortBus::device_at_mut`] for the configuration hooks.

use crate::constants::{
    CONSOLE_PORT, DISPLAY_BASE_PORT, DIVIDER_BASE_PORT, MULTIPLIER_BASE_PORT, RNG_PORT,
    TIMER_BASE_PORT,
};
use crate::cpu::Cpu;
use crate::devices::{
    BindError, Console, Divider, Multiplier, PixelDisplay, PortBus, RandomSource, Timer,
};
use crate::memory::Program;
use crate::pipeline::Pipeline;
use crate::ExecutionError;

/// Builds the default hardware configuration: multiplier, divider, RNG,
/// timer, pixel display, and console, each at its standard port.
///
/// The console starts without a sink and the display without an observer;
/// attach them through [`PortBus::device_at_mut`]. The keyboard is not bound
/// here because it needs a host poller.
pub fn standard_port_bus() -> Result<PortBus, BindError> {
    let mut bus = PortBus::new();
    bus.try_bind(MULTIPLIER_BASE_PORT, Box::new(Multiplier::new()))?;
    bus.try_bind(DIVIDER_BASE_PORT, Box::new(Divider::new()))?;
    bus.try_bind(RNG_PORT, Box::new(RandomSource::new()))?;
    bus.try_bind(TIMER_BASE_PORT, Box::new(Timer::new()))?;
    bus.try_bind(DISPLAY_BASE_PORT, Box::new(PixelDisplay::new()))?;
    bus.try_bind(CONSOLE_PORT, Box::new(Console::new()))?;
    Ok(bus)
}

/// One complete machine: CPU context plus pipeline controller.
///
/// # Examples
///
/// ```
/// use pipe8::{Instruction, Machine, Mnemonic, Operand, Program};
///
/// let program = Program::new(vec![
///     Instruction::new(Mnemonic::Ldi, vec![Operand::Register(1), Operand::Number(42)]),
///     Instruction::new(Mnemonic::Hlt, vec![]),
/// ])
/// .unwrap();
///
/// let mut machine = Machine::new(program).unwrap();
/// machine.run().unwrap();
/// assert_eq!(machine.cpu().register(1), 42);
/// assert!(machine.cpu().halted());
/// ```
pub struct Machine {
    cpu: Cpu,
    pipeline: Pipeline,
}

impl Machine {
    /// Creates a machine with the standard hardware configuration.
    pub fn new(program: Program) -> Result<Self, BindError> {
        Ok(Self::with_ports(program, standard_port_bus()?))
    }

    /// Creates a machine with a caller-assembled port bus. Useful for tests
    /// that want no devices, extra devices, or the permissive port policy.
    pub fn with_ports(program: Program, ports: PortBus) -> Self {
        Self {
            cpu: Cpu::new(ports),
            pipeline: Pipeline::new(program),
        }
    }

    /// The CPU context.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable access to the CPU context, for seeding state and configuring
    /// devices.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// The pipeline controller.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Executes one machine cycle.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        self.pipeline.step(&mut self.cpu)
    }

    /// Runs until the program halts.
    pub fn run(&mut self) -> Result<(), ExecutionError> {
        self.pipeline.run(&mut self.cpu)
    }
}
