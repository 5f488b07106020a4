//! # Pipeline Controller
//!
//! The machine executes through a three-stage instruction pipeline. Each
//! [`Pipeline::step`] pushes one instruction into the FIFO, pops the oldest
//! stage, and executes what it popped, so an instruction fetched now runs
//! three steps later. The pipeline starts full of NOPs.
//!
//! ## Branch flush
//!
//! Control-flow instructions rewrite the PC when they execute, which makes
//! anything fetched behind them stale. The controller therefore stops
//! fetching the moment it pushes a control-flow instruction:
//!
//! 1. The control-flow instruction is pushed without advancing the PC and
//!    `flush_remaining` is armed to `INSTRUCTION_PIPELINE_SIZE - 1`.
//! 2. The next two steps push NOPs, still without advancing the PC. These
//!    drain the instructions that preceded the branch out of the pipeline.
//! 3. One final NOP is pushed *with* PC advancement pending; by the time it
//!    enters, the control-flow instruction has reached the execute stage and
//!    retargeted the PC, so the advancing step lands on the branch target and
//!    normal fetch resumes from there.
//!
//! The three steps after a control-flow instruction executes therefore run
//! NOPs, and the target's effects appear on the fourth.
//!
//! ## Halting
//!
//! `step` is a no-op once the CPU is halted, and [`Pipeline::run`] loops
//! until it observes the halt flag. Instructions already in the pipeline
//! behind a `HLT` never execute.

use crate::constants::INSTRUCTION_PIPELINE_SIZE;
use crate::cpu::Cpu;
use crate::instruction::Instruction;
use crate::instructions;
use crate::memory::Program;
use crate::ExecutionError;
use std::collections::VecDeque;

/// Three-stage pipeline controller. Owns program memory and the stage FIFO;
/// the CPU context is borrowed per step.
pub struct Pipeline {
    program: Program,
    stages: VecDeque<Instruction>,
    flush_remaining: u8,
    final_nop_pending: bool,
}

impl Pipeline {
    /// Creates a controller for `program` with the pipeline full of NOPs.
    pub fn new(program: Program) -> Self {
        let mut stages = VecDeque::with_capacity(INSTRUCTION_PIPELINE_SIZE + 1);
        for _ in 0..INSTRUCTION_PIPELINE_SIZE {
            stages.push_back(Instruction::nop());
        }
        Self {
            program,
            stages,
            flush_remaining: 0,
            final_nop_pending: false,
        }
    }

    /// The loaded program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Number of instructions currently in flight. Constant by construction:
    /// every push is paired with a pop.
    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    /// Executes one machine cycle: select and push the incoming instruction,
    /// pop the oldest stage, and run it.
    ///
    /// Does nothing once the CPU is halted.
    ///
    /// # Errors
    ///
    /// Any fatal program error surfaced by fetch or by the executed
    /// instruction. The CPU context is left in the state immediately before
    /// the failed effect.
    pub fn step(&mut self, cpu: &mut Cpu) -> Result<(), ExecutionError> {
        if cpu.halted() {
            return Ok(());
        }

        let (incoming, advance_pc) = if self.flush_remaining > 0 {
            self.flush_remaining -= 1;
            (Instruction::nop(), false)
        } else if self.final_nop_pending {
            self.final_nop_pending = false;
            (Instruction::nop(), true)
        } else {
            let instr = self.program.fetch(cpu.pc())?.clone();
            if instr.mnemonic().is_control_flow() {
                self.flush_remaining = (INSTRUCTION_PIPELINE_SIZE - 1) as u8;
                self.final_nop_pending = true;
                (instr, false)
            } else {
                (instr, true)
            }
        };

        self.stages.push_back(incoming);
        let current = self
            .stages
            .pop_front()
            .expect("pipeline depth is fixed and nonzero");
        instructions::execute(cpu, &current, advance_pc)
    }

    /// Steps until the CPU halts.
    ///
    /// # Errors
    ///
    /// Stops at the first fatal program error.
    pub fn run(&mut self, cpu: &mut Cpu) -> Result<(), ExecutionError> {
        while !cpu.halted() {
            self.step(cpu)?;
        }
        Ok(())
    }
}
