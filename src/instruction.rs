//! # Decoded Instruction Model
//!
//! This module defines the data the execution engine consumes: decoded
//! instructions as `(mnemonic, operands)` records. The program-loading
//! collaborator performs tokenization, label resolution, and operand
//! validation; by the time an [`Instruction`] reaches the engine its operand
//! arity and kinds are expected to match the mnemonic. Mismatches surface as
//! [`ExecutionError::OperandMismatch`] rather than panics.
//!
//! The mnemonic set is closed: every instruction the machine can execute is a
//! variant of [`Mnemonic`], and the executor dispatch matches on it
//! exhaustively.

use crate::ExecutionError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The complete instruction set, one variant per mnemonic.
///
/// # Examples
///
/// ```
/// use pipe8::Mnemonic;
///
/// let m: Mnemonic = "ADD".parse().unwrap();
/// assert_eq!(m, Mnemonic::Add);
/// assert!(!m.is_control_flow());
/// assert!(Mnemonic::Jmp.is_control_flow());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// No operation.
    Nop,
    /// Halt execution.
    Hlt,
    /// Add two registers.
    Add,
    /// Add two registers plus carry-in.
    Adc,
    /// Subtract (two's-complement add of the inverted operand).
    Sub,
    /// Subtract with carry-in in place of the implicit +1.
    Subc,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOT of the source register.
    Not,
    /// Logical right shift by one.
    Shft,
    /// Right shift by one with carry-in entering the high bit.
    Shfc,
    /// Arithmetic right shift by one (sign bit preserved).
    Shfe,
    /// Sign-extend: 0xFF if the source's high bit is set, else 0x00.
    Sex,
    /// Copy a register.
    Mov,
    /// Conditional register copy.
    Cmv,
    /// Add immediate.
    Adi,
    /// Subtract immediate.
    Subi,
    /// Load immediate.
    Ldi,
    /// Store register to an absolute RAM address.
    Mst,
    /// Store register via pointer + offset addressing.
    Msp,
    /// Store register via stack + offset addressing.
    Mss,
    /// Store register via stack + pointer + offset addressing.
    Msps,
    /// Load register from an absolute RAM address.
    Mld,
    /// Load register via pointer + offset addressing.
    Mlp,
    /// Load register via stack + offset addressing.
    Mls,
    /// Load register via stack + pointer + offset addressing.
    Mlps,
    /// Push an immediate byte onto the RAM stack.
    Psh,
    /// Push a register onto the RAM stack.
    Pshr,
    /// Discard the top `n` stack bytes.
    Pop,
    /// Reserve `n` stack bytes without writing them.
    Pshm,
    /// Unconditional jump.
    Jmp,
    /// Conditional branch.
    Brh,
    /// Call: push the return address and jump.
    Cal,
    /// Return: shrink the stack and pop the return address.
    Ret,
    /// Store a register to an I/O port.
    Pst,
    /// Store two registers to two consecutive I/O ports.
    Dps,
    /// Load a register from an I/O port.
    Pld,
}

impl Mnemonic {
    /// Returns true for instructions that manage the program counter
    /// themselves and therefore trigger the pipeline flush discipline.
    pub fn is_control_flow(self) -> bool {
        matches!(
            self,
            Mnemonic::Jmp | Mnemonic::Brh | Mnemonic::Cal | Mnemonic::Ret | Mnemonic::Hlt
        )
    }

    /// The canonical upper-case spelling of this mnemonic.
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Nop => "NOP",
            Mnemonic::Hlt => "HLT",
            Mnemonic::Add => "ADD",
            Mnemonic::Adc => "ADC",
            Mnemonic::Sub => "SUB",
            Mnemonic::Subc => "SUBC",
            Mnemonic::And => "AND",
            Mnemonic::Or => "OR",
            Mnemonic::Xor => "XOR",
            Mnemonic::Not => "NOT",
            Mnemonic::Shft => "SHFT",
            Mnemonic::Shfc => "SHFC",
            Mnemonic::Shfe => "SHFE",
            Mnemonic::Sex => "SEX",
            Mnemonic::Mov => "MOV",
            Mnemonic::Cmv => "CMV",
            Mnemonic::Adi => "ADI",
            Mnemonic::Subi => "SUBI",
            Mnemonic::Ldi => "LDI",
            Mnemonic::Mst => "MST",
            Mnemonic::Msp => "MSP",
            Mnemonic::Mss => "MSS",
            Mnemonic::Msps => "MSPS",
            Mnemonic::Mld => "MLD",
            Mnemonic::Mlp => "MLP",
            Mnemonic::Mls => "MLS",
            Mnemonic::Mlps => "MLPS",
            Mnemonic::Psh => "PSH",
            Mnemonic::Pshr => "PSHR",
            Mnemonic::Pop => "POP",
            Mnemonic::Pshm => "PSHM",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Brh => "BRH",
            Mnemonic::Cal => "CAL",
            Mnemonic::Ret => "RET",
            Mnemonic::Pst => "PST",
            Mnemonic::Dps => "DPS",
            Mnemonic::Pld => "PLD",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mnemonic string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mnemonic {0:?}")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Mnemonic {
    type Err = UnknownMnemonic;

    /// Parses a mnemonic, case-insensitively. `PHR` is accepted as an alias
    /// for `PSHR`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let m = match s.to_ascii_uppercase().as_str() {
            "NOP" => Mnemonic::Nop,
            "HLT" => Mnemonic::Hlt,
            "ADD" => Mnemonic::Add,
            "ADC" => Mnemonic::Adc,
            "SUB" => Mnemonic::Sub,
            "SUBC" => Mnemonic::Subc,
            "AND" => Mnemonic::And,
            "OR" => Mnemonic::Or,
            "XOR" => Mnemonic::Xor,
            "NOT" => Mnemonic::Not,
            "SHFT" => Mnemonic::Shft,
            "SHFC" => Mnemonic::Shfc,
            "SHFE" => Mnemonic::Shfe,
            "SEX" => Mnemonic::Sex,
            "MOV" => Mnemonic::Mov,
            "CMV" => Mnemonic::Cmv,
            "ADI" => Mnemonic::Adi,
            "SUBI" => Mnemonic::Subi,
            "LDI" => Mnemonic::Ldi,
            "MST" => Mnemonic::Mst,
            "MSP" => Mnemonic::Msp,
            "MSS" => Mnemonic::Mss,
            "MSPS" => Mnemonic::Msps,
            "MLD" => Mnemonic::Mld,
            "MLP" => Mnemonic::Mlp,
            "MLS" => Mnemonic::Mls,
            "MLPS" => Mnemonic::Mlps,
            "PSH" => Mnemonic::Psh,
            "PSHR" | "PHR" => Mnemonic::Pshr,
            "POP" => Mnemonic::Pop,
            "PSHM" => Mnemonic::Pshm,
            "JMP" => Mnemonic::Jmp,
            "BRH" => Mnemonic::Brh,
            "CAL" => Mnemonic::Cal,
            "RET" => Mnemonic::Ret,
            "PST" => Mnemonic::Pst,
            "DPS" => Mnemonic::Dps,
            "PLD" => Mnemonic::Pld,
            _ => return Err(UnknownMnemonic(s.to_string())),
        };
        Ok(m)
    }
}

/// One decoded operand.
///
/// Three kinds exist:
///
/// - `Register`: a 3-bit register index (R0 through R7)
/// - `Number`: an unsigned byte, reinterpreted as signed two's-complement by
///   the offset addressing modes
/// - `Address`: a 10-bit program memory address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Register index in `0..8`.
    Register(u8),
    /// Unsigned 8-bit literal.
    Number(u8),
    /// Program memory address in `0..1024`.
    Address(u16),
}

/// A decoded instruction: a mnemonic and its operand list.
///
/// # Examples
///
/// ```
/// use pipe8::{Instruction, Mnemonic, Operand};
///
/// // ADD R1, R1, R2
/// let add = Instruction::new(
///     Mnemonic::Add,
///     vec![Operand::Register(1), Operand::Register(1), Operand::Register(2)],
/// );
/// assert_eq!(add.mnemonic(), Mnemonic::Add);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    mnemonic: Mnemonic,
    operands: Vec<Operand>,
}

impl Instruction {
    /// Creates an instruction from a mnemonic and operand list.
    pub fn new(mnemonic: Mnemonic, operands: Vec<Operand>) -> Self {
        Self { mnemonic, operands }
    }

    /// The canonical no-operation instruction. The pipeline is seeded with
    /// these and injects them during flushes.
    pub fn nop() -> Self {
        Self::new(Mnemonic::Nop, Vec::new())
    }

    /// This instruction's mnemonic.
    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    /// This instruction's operands, in source order.
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    fn mismatch(&self, index: usize) -> ExecutionError {
        ExecutionError::OperandMismatch {
            mnemonic: self.mnemonic,
            index,
        }
    }

    /// Register index at `index`.
    pub(crate) fn reg(&self, index: usize) -> Result<u8, ExecutionError> {
        match self.operands.get(index) {
            Some(Operand::Register(r)) => Ok(*r),
            _ => Err(self.mismatch(index)),
        }
    }

    /// Register index at `index`, defaulting to R0 when the operand is
    /// omitted. Used for the optional third operand of ALU instructions.
    pub(crate) fn reg_or_zero(&self, index: usize) -> Result<u8, ExecutionError> {
        match self.operands.get(index) {
            Some(Operand::Register(r)) => Ok(*r),
            None => Ok(0),
            Some(_) => Err(self.mismatch(index)),
        }
    }

    /// Numeric literal at `index`.
    pub(crate) fn number(&self, index: usize) -> Result<u8, ExecutionError> {
        match self.operands.get(index) {
            Some(Operand::Number(n)) => Ok(*n),
            _ => Err(self.mismatch(index)),
        }
    }

    /// Program address at `index`.
    pub(crate) fn address(&self, index: usize) -> Result<u16, ExecutionError> {
        match self.operands.get(index) {
            Some(Operand::Address(a)) => Ok(*a),
            _ => Err(self.mismatch(index)),
        }
    }
}

/// Condition codes shared by `BRH` and `CMV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Code 0: taken when the zero flag is set.
    Zero,
    /// Code 1: taken when the zero flag is clear.
    NotZero,
    /// Code 2: taken when the carry flag is set.
    Carry,
    /// Code 3: taken when the carry flag is clear.
    NotCarry,
}

impl Condition {
    /// Decodes a condition from its numeric operand encoding.
    pub fn from_code(code: u8) -> Result<Self, ExecutionError> {
        match code {
            0 => Ok(Condition::Zero),
            1 => Ok(Condition::NotZero),
            2 => Ok(Condition::Carry),
            3 => Ok(Condition::NotCarry),
            _ => Err(ExecutionError::InvalidCondition { code }),
        }
    }

    /// Evaluates the condition against the current flag values.
    pub fn holds(self, z: bool, c: bool) -> bool {
        match self {
            Condition::Zero => z,
            Condition::NotZero => !z,
            Condition::Carry => c,
            Condition::NotCarry => !c,
        }
    }
}
