//! # Load and Store Instructions
//!
//! LDI loads an immediate into a register. The eight memory instructions are
//! four store/load pairs, one per addressing mode; the mode is recovered from
//! the mnemonic and the effective-address computation lives in
//! [`crate::addressing`].
//!
//! Loads (and LDI) set `Z` from the loaded byte and leave `C` alone. Stores
//! change no flags.

use crate::addressing::AddressingMode;
use crate::cpu::Cpu;
use crate::instruction::{Instruction, Mnemonic};
use crate::ExecutionError;

fn mode_of(instr: &Instruction) -> AddressingMode {
    match instr.mnemonic() {
        Mnemonic::Mst | Mnemonic::Mld => AddressingMode::Absolute,
        Mnemonic::Msp | Mnemonic::Mlp => AddressingMode::PointerOffset,
        Mnemonic::Mss | Mnemonic::Mls => AddressingMode::StackOffset,
        _ => AddressingMode::StackPointerOffset,
    }
}

/// LDI: `dst <- imm`.
pub(crate) fn execute_ldi(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let dst = instr.reg(0)?;
    let imm = instr.number(1)?;
    cpu.store_loaded(dst, imm);
    Ok(())
}

/// MST / MSP / MSS / MSPS: store operand 0's register to the effective RAM
/// address.
pub(crate) fn execute_store(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let addr = mode_of(instr).effective_address(cpu, instr)?;
    let value = cpu.registers.read(instr.reg(0)?);
    cpu.ram.write(addr, value);
    Ok(())
}

/// MLD / MLP / MLS / MLPS: load the effective RAM address into operand 0's
/// register.
pub(crate) fn execute_load(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let addr = mode_of(instr).effective_address(cpu, instr)?;
    let dst = instr.reg(0)?;
    let value = cpu.ram.read(addr);
    cpu.store_loaded(dst, value);
    Ok(())
}
