//! # RAM Addressing Modes
//!
//! The memory instructions compute an 8-bit RAM address through one of four
//! addressing modes. Offsets are unsigned bytes reinterpreted as signed
//! two's-complement; under wrapping mod-256 arithmetic the signed and
//! unsigned readings produce the same address, so the implementation uses
//! `wrapping_sub` throughout.
//!
//! | Mode | Address expression |
//! |------|--------------------|
//! | absolute | `addr` |
//! | pointer + offset | `(ptr - offset - 1) & 0xFF` |
//! | stack + offset | `(SP - offset - 1) & 0xFF` |
//! | stack + pointer + offset | `((SP - offset - 1) - ptr - 1) & 0xFF` |
//!
//! The `- 1` folds the "next free slot" convention of the stack pointer into
//! the address: with `offset = 0`, stack-relative accesses hit the most
//! recently pushed byte.

use crate::cpu::Cpu;
use crate::instruction::Instruction;
use crate::ExecutionError;

/// How a memory instruction derives its RAM address from its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Operand 1 is the address itself (`MST`/`MLD`).
    Absolute,
    /// Operand 1 is a pointer register, operand 2 a signed offset
    /// (`MSP`/`MLP`).
    PointerOffset,
    /// Operand 1 is a signed offset from the stack pointer (`MSS`/`MLS`).
    StackOffset,
    /// Operand 1 is a pointer register indexed below a stack-relative base,
    /// operand 2 the signed offset (`MSPS`/`MLPS`).
    StackPointerOffset,
}

impl AddressingMode {
    /// Computes the effective RAM address for `instr` against the current
    /// CPU state. Operand 0 is always the data register and never consulted
    /// here.
    pub(crate) fn effective_address(
        self,
        cpu: &Cpu,
        instr: &Instruction,
    ) -> Result<u8, ExecutionError> {
        match self {
            AddressingMode::Absolute => instr.number(1),
            AddressingMode::PointerOffset => {
                let ptr = cpu.registers.read(instr.reg(1)?);
                let offset = instr.number(2)?;
                Ok(ptr.wrapping_sub(offset).wrapping_sub(1))
            }
            AddressingMode::StackOffset => {
                let offset = instr.number(1)?;
                Ok(cpu.sp.value().wrapping_sub(offset).wrapping_sub(1))
            }
            AddressingMode::StackPointerOffset => {
                let ptr = cpu.registers.read(instr.reg(1)?);
                let offset = instr.number(2)?;
                let base = cpu.sp.value().wrapping_sub(offset).wrapping_sub(1);
                Ok(base.wrapping_sub(ptr).wrapping_sub(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::PortBus;
    use crate::instruction::{Mnemonic, Operand};

    fn cpu() -> Cpu {
        Cpu::new(PortBus::new())
    }

    #[test]
    fn test_absolute() {
        let cpu = cpu();
        let instr = Instruction::new(
            Mnemonic::Mst,
            vec![Operand::Register(1), Operand::Number(0x42)],
        );
        let addr = AddressingMode::Absolute
            .effective_address(&cpu, &instr)
            .unwrap();
        assert_eq!(addr, 0x42);
    }

    #[test]
    fn test_pointer_offset() {
        let mut cpu = cpu();
        cpu.set_register(2, 0x10);
        let instr = Instruction::new(
            Mnemonic::Msp,
            vec![
                Operand::Register(1),
                Operand::Register(2),
                Operand::Number(3),
            ],
        );
        let addr = AddressingMode::PointerOffset
            .effective_address(&cpu, &instr)
            .unwrap();
        // 0x10 - 3 - 1
        assert_eq!(addr, 0x0C);
    }

    #[test]
    fn test_pointer_negative_offset_wraps() {
        let mut cpu = cpu();
        cpu.set_register(2, 0x10);
        // 0xFF reads as -1: 0x10 - (-1) - 1 = 0x10
        let instr = Instruction::new(
            Mnemonic::Msp,
            vec![
                Operand::Register(1),
                Operand::Register(2),
                Operand::Number(0xFF),
            ],
        );
        let addr = AddressingMode::PointerOffset
            .effective_address(&cpu, &instr)
            .unwrap();
        assert_eq!(addr, 0x10);
    }

    #[test]
    fn test_stack_offset_hits_top_of_stack() {
        let mut cpu = cpu();
        cpu.sp_mut().increment(5).unwrap();
        let instr = Instruction::new(
            Mnemonic::Mls,
            vec![Operand::Register(1), Operand::Number(0)],
        );
        let addr = AddressingMode::StackOffset
            .effective_address(&cpu, &instr)
            .unwrap();
        // SP = 5 points at the next free slot; offset 0 is the last push.
        assert_eq!(addr, 4);
    }

    #[test]
    fn test_stack_pointer_offset() {
        let mut cpu = cpu();
        cpu.sp_mut().increment(10).unwrap();
        cpu.set_register(3, 2);
        let instr = Instruction::new(
            Mnemonic::Mlps,
            vec![
                Operand::Register(1),
                Operand::Register(3),
                Operand::Number(1),
            ],
        );
        let addr = AddressingMode::StackPointerOffset
            .effective_address(&cpu, &instr)
            .unwrap();
        // (10 - 1 - 1) - 2 - 1
        assert_eq!(addr, 5);
    }
}
