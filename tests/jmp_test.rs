//! Tests for JMP: unconditional branch with pipeline flush.

use pipe8::{ExecutionError, Instruction, Machine, Mnemonic, Operand, PortBus, Program};

fn reg(r: u8) -> Operand {
    Operand::Register(r)
}

fn ldi(r: u8, v: u8) -> Instruction {
    Instruction::new(Mnemonic::Ldi, vec![reg(r), Operand::Number(v)])
}

fn jmp(addr: u16) -> Instruction {
    Instruction::new(Mnemonic::Jmp, vec![Operand::Address(addr)])
}

fn hlt() -> Instruction {
    Instruction::new(Mnemonic::Hlt, vec![])
}

fn machine(instrs: Vec<Instruction>) -> Machine {
    Machine::with_ports(Program::new(instrs).unwrap(), PortBus::new())
}

#[test]
fn test_jmp_skips_instructions() {
    let mut m = machine(vec![
        ldi(1, 10),
        jmp(4),
        ldi(2, 20), // skipped
        hlt(),      // skipped
        ldi(3, 30),
        hlt(),
    ]);
    m.run().unwrap();
    assert_eq!(m.cpu().register(1), 10);
    assert_eq!(m.cpu().register(2), 0);
    assert_eq!(m.cpu().register(3), 30);
    assert!(m.cpu().halted());
}

#[test]
fn test_jmp_backward_forms_a_loop() {
    // Counts R1 down from 3, jumping back until Z is set.
    let mut m = machine(vec![
        ldi(1, 3),
        Instruction::new(
            Mnemonic::Subi,
            vec![reg(1), reg(1), Operand::Number(1)],
        ),
        Instruction::new(
            Mnemonic::Brh,
            vec![Operand::Number(0), Operand::Address(4)],
        ),
        jmp(1),
        hlt(),
    ]);
    m.run().unwrap();
    assert_eq!(m.cpu().register(1), 0);
    assert!(m.cpu().halted());
}

#[test]
fn test_jmp_to_self_spins_in_place() {
    let mut m = machine(vec![jmp(0)]);
    for _ in 0..100 {
        m.step().unwrap();
    }
    assert!(!m.cpu().halted());
    assert_eq!(m.cpu().pc(), 0);
}

#[test]
fn test_jmp_target_out_of_range_is_fatal() {
    let mut m = machine(vec![jmp(1024), hlt()]);
    assert!(matches!(
        m.run(),
        Err(ExecutionError::BranchOutOfRange { addr: 1024 })
    ));
}

#[test]
fn test_instructions_before_jmp_still_execute() {
    // The two loads sit in the pipeline when JMP is fetched; the flush must
    // drain them, not void them.
    let mut m = machine(vec![
        ldi(1, 1),
        ldi(2, 2),
        jmp(4),
        ldi(3, 3), // skipped
        hlt(),
    ]);
    m.run().unwrap();
    assert_eq!(m.cpu().register(1), 1);
    assert_eq!(m.cpu().register(2), 2);
    assert_eq!(m.cpu().register(3), 0);
}
