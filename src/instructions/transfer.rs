//! # Register Transfer Instructions
//!
//! MOV copies unconditionally and behaves like a logic instruction flag-wise
//! (`Z` from the moved byte, `C` cleared). CMV copies only when its condition
//! code holds; when the condition fails, registers and flags are untouched.

use crate::cpu::Cpu;
use crate::instruction::{Condition, Instruction};
use crate::ExecutionError;

/// MOV: `dst <- src`.
pub(crate) fn execute_mov(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let dst = instr.reg(0)?;
    let value = cpu.registers.read(instr.reg(1)?);
    cpu.store_logical(dst, value);
    Ok(())
}

/// CMV: `dst <- src` when the condition holds; `Z` tracks the moved byte.
pub(crate) fn execute_cmv(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let dst = instr.reg(0)?;
    let src = instr.reg(1)?;
    let condition = Condition::from_code(instr.number(2)?)?;
    if condition.holds(cpu.flag_z, cpu.flag_c) {
        let value = cpu.registers.read(src);
        cpu.registers.write(dst, value);
        cpu.flag_z = value == 0;
    }
    Ok(())
}
