//! Tests for the random source and timer devices under program control.

use pipe8::constants::{RNG_PORT, TIMER_BASE_PORT};
use pipe8::devices::RandomSource;
use pipe8::{Instruction, Machine, Mnemonic, Operand, PortBus, Program};

fn pld(r: u8, port: u8) -> Instruction {
    Instruction::new(
        Mnemonic::Pld,
        vec![Operand::Register(r), Operand::Number(port)],
    )
}

fn hlt() -> Instruction {
    Instruction::new(Mnemonic::Hlt, vec![])
}

fn seeded_machine(program: Program, seed: u64) -> Machine {
    let mut bus = PortBus::new();
    bus.try_bind(RNG_PORT, Box::new(RandomSource::with_seed(seed)))
        .unwrap();
    Machine::with_ports(program, bus)
}

#[test]
fn test_seeded_rng_is_deterministic_across_machines() {
    let program = || {
        Program::new(vec![pld(1, RNG_PORT), pld(2, RNG_PORT), hlt()]).unwrap()
    };
    let mut a = seeded_machine(program(), 42);
    let mut b = seeded_machine(program(), 42);
    a.run().unwrap();
    b.run().unwrap();
    assert_eq!(a.cpu().register(1), b.cpu().register(1));
    assert_eq!(a.cpu().register(2), b.cpu().register(2));
}

#[test]
fn test_rng_store_is_ignored() {
    let program = Program::new(vec![
        Instruction::new(
            Mnemonic::Ldi,
            vec![Operand::Register(1), Operand::Number(0x55)],
        ),
        Instruction::new(
            Mnemonic::Pst,
            vec![Operand::Register(1), Operand::Number(RNG_PORT)],
        ),
        pld(2, RNG_PORT),
        hlt(),
    ])
    .unwrap();
    let mut with_store = seeded_machine(program, 7);

    let control = Program::new(vec![pld(2, RNG_PORT), hlt()]).unwrap();
    let mut without_store = seeded_machine(control, 7);

    with_store.run().unwrap();
    without_store.run().unwrap();
    assert_eq!(
        with_store.cpu().register(2),
        without_store.cpu().register(2),
        "a store must not advance the generator"
    );
}

#[test]
fn test_timer_high_bytes_read_zero_on_a_fresh_machine() {
    // A test run finishes in well under 256 ms, so only the low byte of the
    // millisecond counter can be nonzero.
    let program = Program::new(vec![
        pld(1, TIMER_BASE_PORT),
        pld(2, TIMER_BASE_PORT + 1),
        pld(3, TIMER_BASE_PORT + 2),
        pld(4, TIMER_BASE_PORT + 3),
        hlt(),
    ])
    .unwrap();

    let mut m = Machine::new(program).unwrap();
    m.run().unwrap();
    assert_eq!(m.cpu().register(2), 0);
    assert_eq!(m.cpu().register(3), 0);
    assert_eq!(m.cpu().register(4), 0);
    assert!(m.cpu().flag_z(), "the last byte loaded was zero");
}

#[test]
fn test_timer_store_is_ignored() {
    let program = Program::new(vec![
        Instruction::new(
            Mnemonic::Ldi,
            vec![Operand::Register(1), Operand::Number(0xFF)],
        ),
        Instruction::new(
            Mnemonic::Pst,
            vec![Operand::Register(1), Operand::Number(TIMER_BASE_PORT + 3)],
        ),
        pld(2, TIMER_BASE_PORT + 3),
        hlt(),
    ])
    .unwrap();

    let mut m = Machine::new(program).unwrap();
    m.run().unwrap();
    assert_eq!(m.cpu().register(2), 0, "byte 3 of the counter is still zero");
}
