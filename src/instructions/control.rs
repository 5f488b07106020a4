//! # Control Flow Instructions
//!
//! These five instructions manage the program counter themselves and are the
//! ones the pipeline controller flushes behind. By the time a control-flow
//! instruction reaches the execute stage the controller has stopped advancing
//! the PC, so the PC still names this instruction's own address; `CAL` relies
//! on that when it records `PC + 1` as the return address.

use crate::cpu::Cpu;
use crate::instruction::{Condition, Instruction};
use crate::ExecutionError;

/// JMP: unconditional branch.
pub(crate) fn execute_jmp(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    cpu.pc.set_branch(instr.address(0)?)
}

/// BRH: branch when the condition holds, otherwise fall through to the next
/// instruction.
pub(crate) fn execute_brh(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let condition = Condition::from_code(instr.number(0)?)?;
    let target = instr.address(1)?;
    if condition.holds(cpu.flag_z, cpu.flag_c) {
        cpu.pc.set_branch(target)
    } else {
        cpu.pc.increment()
    }
}

/// CAL: push the return address and branch to the target.
pub(crate) fn execute_cal(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    cpu.pc.push_call(instr.address(0)?)
}

/// RET: release `n` stack bytes, then return to the pushed address.
pub(crate) fn execute_ret(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let frame = instr.number(0)?;
    // Validate the call stack before moving SP so a bad return leaves the
    // stack pointer where it was.
    if cpu.pc.call_depth() == 0 {
        return Err(ExecutionError::EmptyCallStack);
    }
    cpu.sp.decrement(frame)?;
    cpu.pc.pop_return()
}

/// HLT: stop the machine. The PC stays on the halt instruction.
pub(crate) fn execute_hlt(cpu: &mut Cpu) -> Result<(), ExecutionError> {
    cpu.halted = true;
    Ok(())
}
