//! # Port I/O Instructions
//!
//! PST and DPS store register values to ports; PLD loads a port into a
//! register and sets `Z` like any other load. DPS validates both of its
//! ports before storing to either, so a half-written device pair cannot be
//! observed after a fault.

use crate::cpu::Cpu;
use crate::devices::UnmappedPortPolicy;
use crate::instruction::Instruction;
use crate::ExecutionError;

/// PST: store a register to one port.
pub(crate) fn execute_pst(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let value = cpu.registers.read(instr.reg(0)?);
    let port = instr.number(1)?;
    cpu.ports.write(port, value)
}

/// DPS: store two registers to two consecutive ports.
pub(crate) fn execute_dps(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let a = cpu.registers.read(instr.reg(0)?);
    let b = cpu.registers.read(instr.reg(1)?);
    let base = instr.number(2)?;
    // A base of 255 would put the second slot past the port space; that slot
    // is unmapped by definition.
    let second = base.checked_add(1);

    cpu.ports.check_mapped(base)?;
    match second {
        Some(port) => cpu.ports.check_mapped(port)?,
        None if cpu.ports.policy() == UnmappedPortPolicy::Strict => {
            return Err(ExecutionError::UnmappedPort {
                port: base as u16 + 1,
            });
        }
        None => {}
    }

    cpu.ports.write(base, a)?;
    if let Some(port) = second {
        cpu.ports.write(port, b)?;
    }
    Ok(())
}

/// PLD: load a port into a register.
pub(crate) fn execute_pld(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let dst = instr.reg(0)?;
    let port = instr.number(1)?;
    let value = cpu.ports.read(port)?;
    cpu.store_loaded(dst, value);
    Ok(())
}
