//! # ALU Instructions
//!
//! Arithmetic and logic on registers plus the two immediate arithmetic forms.
//!
//! All arithmetic runs through a 9-bit-wide sum so the carry-out falls out of
//! the high bit: subtraction is the two's-complement identity
//! `A - B = A + !B + 1`, which makes its carry the inverted borrow
//! (`C` set exactly when `A >= B` for `SUB`). Logic instructions force the
//! carry clear.
//!
//! Binary register forms take `(dst, srcA, srcB)`; when `srcB` is omitted it
//! defaults to R0 and therefore reads 0.

use crate::cpu::Cpu;
use crate::instruction::Instruction;
use crate::ExecutionError;

/// Reads the operands of a binary register-form instruction.
fn binary_sources(cpu: &Cpu, instr: &Instruction) -> Result<(u8, u8, u8), ExecutionError> {
    let dst = instr.reg(0)?;
    let a = cpu.registers.read(instr.reg(1)?);
    let b = cpu.registers.read(instr.reg_or_zero(2)?);
    Ok((dst, a, b))
}

/// Reads the operands of a unary register-form instruction.
fn unary_source(cpu: &Cpu, instr: &Instruction) -> Result<(u8, u8), ExecutionError> {
    let dst = instr.reg(0)?;
    let a = cpu.registers.read(instr.reg(1)?);
    Ok((dst, a))
}

/// ADD: `dst <- A + B`, carry from the 9-bit sum.
pub(crate) fn execute_add(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a, b) = binary_sources(cpu, instr)?;
    cpu.store_arithmetic(dst, a as u16 + b as u16);
    Ok(())
}

/// ADC: `dst <- A + B + C`.
pub(crate) fn execute_adc(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a, b) = binary_sources(cpu, instr)?;
    let carry_in = cpu.flag_c as u16;
    cpu.store_arithmetic(dst, a as u16 + b as u16 + carry_in);
    Ok(())
}

/// SUB: `dst <- A + !B + 1`, carry set when no borrow occurred.
pub(crate) fn execute_sub(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a, b) = binary_sources(cpu, instr)?;
    cpu.store_arithmetic(dst, a as u16 + (!b) as u16 + 1);
    Ok(())
}

/// SUBC: `dst <- A + !B + C`, the multi-byte subtraction step.
pub(crate) fn execute_subc(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a, b) = binary_sources(cpu, instr)?;
    let carry_in = cpu.flag_c as u16;
    cpu.store_arithmetic(dst, a as u16 + (!b) as u16 + carry_in);
    Ok(())
}

/// AND: `dst <- A & B`.
pub(crate) fn execute_and(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a, b) = binary_sources(cpu, instr)?;
    cpu.store_logical(dst, a & b);
    Ok(())
}

/// OR: `dst <- A | B`.
pub(crate) fn execute_or(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a, b) = binary_sources(cpu, instr)?;
    cpu.store_logical(dst, a | b);
    Ok(())
}

/// XOR: `dst <- A ^ B`.
pub(crate) fn execute_xor(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a, b) = binary_sources(cpu, instr)?;
    cpu.store_logical(dst, a ^ b);
    Ok(())
}

/// NOT: `dst <- !A`.
pub(crate) fn execute_not(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a) = unary_source(cpu, instr)?;
    cpu.store_logical(dst, !a);
    Ok(())
}

/// SEX: `dst <- 0xFF` when A's sign bit is set, else `0x00`.
pub(crate) fn execute_sex(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let (dst, a) = unary_source(cpu, instr)?;
    let extended = if a & 0x80 != 0 { 0xFF } else { 0x00 };
    cpu.store_logical(dst, extended);
    Ok(())
}

/// ADI: `dst <- srcA + imm`, carry from the 9-bit sum.
pub(crate) fn execute_adi(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let dst = instr.reg(0)?;
    let a = cpu.registers.read(instr.reg(1)?);
    let imm = instr.number(2)?;
    cpu.store_arithmetic(dst, a as u16 + imm as u16);
    Ok(())
}

/// SUBI: `dst <- srcA + !imm + 1`.
pub(crate) fn execute_subi(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    let dst = instr.reg(0)?;
    let a = cpu.registers.read(instr.reg(1)?);
    let imm = instr.number(2)?;
    cpu.store_arithmetic(dst, a as u16 + (!imm) as u16 + 1);
    Ok(())
}
