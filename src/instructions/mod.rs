//! # Instruction Implementations
//!
//! Executor functions for the full instruction set, organized by category.
//! Each function takes the CPU context and the decoded instruction; the
//! dispatch below matches exhaustively on the mnemonic, so adding a variant
//! to [`Mnemonic`] forces the new instruction to be wired here.
//!
//! ## Categories
//!
//! - **alu**: arithmetic and logic (ADD, ADC, SUB, SUBC, AND, OR, XOR, NOT,
//!   SEX, ADI, SUBI)
//! - **shifts**: right shifts (SHFT, SHFC, SHFE)
//! - **transfer**: register copies (MOV, CMV)
//! - **load_store**: immediates and RAM traffic (LDI, MST, MSP, MSS, MSPS,
//!   MLD, MLP, MLS, MLPS)
//! - **stack**: stack pointer operations (PSH, PSHR, POP, PSHM)
//! - **control**: PC-managing instructions (JMP, BRH, CAL, RET, HLT)
//! - **io**: port traffic (PST, DPS, PLD)

use crate::cpu::Cpu;
use crate::instruction::{Instruction, Mnemonic};
use crate::ExecutionError;

pub(crate) mod alu;
pub(crate) mod control;
pub(crate) mod io;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

/// Runs one decoded instruction against the CPU context.
///
/// Applies the instruction's semantics, then advances the program counter if
/// `advance_pc` is set and the instruction is not control-flow. Control-flow
/// instructions manage the PC themselves.
pub(crate) fn execute(
    cpu: &mut Cpu,
    instr: &Instruction,
    advance_pc: bool,
) -> Result<(), ExecutionError> {
    dispatch(cpu, instr)?;
    if advance_pc && !instr.mnemonic().is_control_flow() {
        cpu.pc.increment()?;
    }
    Ok(())
}

/// Maps a mnemonic to its semantics. Exhaustive over the instruction set.
fn dispatch(cpu: &mut Cpu, instr: &Instruction) -> Result<(), ExecutionError> {
    match instr.mnemonic() {
        Mnemonic::Nop => Ok(()),
        Mnemonic::Hlt => control::execute_hlt(cpu),

        Mnemonic::Add => alu::execute_add(cpu, instr),
        Mnemonic::Adc => alu::execute_adc(cpu, instr),
        Mnemonic::Sub => alu::execute_sub(cpu, instr),
        Mnemonic::Subc => alu::execute_subc(cpu, instr),
        Mnemonic::And => alu::execute_and(cpu, instr),
        Mnemonic::Or => alu::execute_or(cpu, instr),
        Mnemonic::Xor => alu::execute_xor(cpu, instr),
        Mnemonic::Not => alu::execute_not(cpu, instr),
        Mnemonic::Sex => alu::execute_sex(cpu, instr),
        Mnemonic::Adi => alu::execute_adi(cpu, instr),
        Mnemonic::Subi => alu::execute_subi(cpu, instr),

        Mnemonic::Shft => shifts::execute_shft(cpu, instr),
        Mnemonic::Shfc => shifts::execute_shfc(cpu, instr),
        Mnemonic::Shfe => shifts::execute_shfe(cpu, instr),

        Mnemonic::Mov => transfer::execute_mov(cpu, instr),
        Mnemonic::Cmv => transfer::execute_cmv(cpu, instr),

        Mnemonic::Ldi => load_store::execute_ldi(cpu, instr),
        Mnemonic::Mst | Mnemonic::Msp | Mnemonic::Mss | Mnemonic::Msps => {
            load_store::execute_store(cpu, instr)
        }
        Mnemonic::Mld | Mnemonic::Mlp | Mnemonic::Mls | Mnemonic::Mlps => {
            load_store::execute_load(cpu, instr)
        }

        Mnemonic::Psh => stack::execute_psh(cpu, instr),
        Mnemonic::Pshr => stack::execute_pshr(cpu, instr),
        Mnemonic::Pop => stack::execute_pop(cpu, instr),
        Mnemonic::Pshm => stack::execute_pshm(cpu, instr),

        Mnemonic::Jmp => control::execute_jmp(cpu, instr),
        Mnemonic::Brh => control::execute_brh(cpu, instr),
        Mnemonic::Cal => control::execute_cal(cpu, instr),
        Mnemonic::Ret => control::execute_ret(cpu, instr),

        Mnemonic::Pst => io::execute_pst(cpu, instr),
        Mnemonic::Dps => io::execute_dps(cpu, instr),
        Mnemonic::Pld => io::execute_pld(cpu, instr),
    }
}
