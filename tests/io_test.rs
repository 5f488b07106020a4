//! Tests for the port instructions: PST, DPS, PLD.
//!
//! Under the default strict policy any access to an unmapped port is fatal;
//! the permissive policy turns unmapped loads into zeros and unmapped stores
//! into no-ops. DPS must not half-store when its second port is missing.

use pipe8::devices::{Multiplier, PixelDisplay};
use pipe8::{
    ExecutionError, Instruction, Machine, Mnemonic, Operand, PortBus, Program,
    UnmappedPortPolicy,
};

fn reg(r: u8) -> Operand {
    Operand::Register(r)
}

fn num(n: u8) -> Operand {
    Operand::Number(n)
}

fn ldi(r: u8, v: u8) -> Instruction {
    Instruction::new(Mnemonic::Ldi, vec![reg(r), num(v)])
}

fn pst(r: u8, port: u8) -> Instruction {
    Instruction::new(Mnemonic::Pst, vec![reg(r), num(port)])
}

fn pld(r: u8, port: u8) -> Instruction {
    Instruction::new(Mnemonic::Pld, vec![reg(r), num(port)])
}

fn hlt() -> Instruction {
    Instruction::new(Mnemonic::Hlt, vec![])
}

fn multiplier_bus() -> PortBus {
    let mut bus = PortBus::new();
    bus.try_bind(0, Box::new(Multiplier::new())).unwrap();
    bus
}

#[test]
fn test_pst_and_pld_reach_the_device() {
    let mut m = Machine::with_ports(
        Program::new(vec![
            ldi(1, 6),
            ldi(2, 7),
            pst(1, 0),
            pst(2, 1),
            pld(3, 0),
            hlt(),
        ])
        .unwrap(),
        multiplier_bus(),
    );
    m.run().unwrap();
    assert_eq!(m.cpu().register(3), 42);
}

#[test]
fn test_pld_sets_z_on_zero() {
    let mut m = Machine::with_ports(
        Program::new(vec![ldi(1, 1), pld(1, 0), hlt()]).unwrap(),
        multiplier_bus(),
    );
    m.run().unwrap();
    assert_eq!(m.cpu().register(1), 0);
    assert!(m.cpu().flag_z());
}

#[test]
fn test_pld_leaves_carry_unchanged() {
    let mut m = Machine::with_ports(
        Program::new(vec![
            ldi(1, 255),
            Instruction::new(Mnemonic::Adi, vec![reg(1), reg(1), num(1)]),
            pld(2, 0),
            hlt(),
        ])
        .unwrap(),
        multiplier_bus(),
    );
    m.run().unwrap();
    assert!(m.cpu().flag_c());
}

#[test]
fn test_dps_stores_a_pair() {
    let mut m = Machine::with_ports(
        Program::new(vec![
            ldi(1, 5),
            ldi(2, 9),
            Instruction::new(Mnemonic::Dps, vec![reg(1), reg(2), num(0)]),
            pld(3, 0),
            hlt(),
        ])
        .unwrap(),
        multiplier_bus(),
    );
    m.run().unwrap();
    assert_eq!(m.cpu().register(3), 45);
}

// ========== Unmapped ports, strict ==========

#[test]
fn test_strict_pst_to_unmapped_port_is_fatal() {
    let mut m = Machine::with_ports(
        Program::new(vec![pst(1, 200), hlt()]).unwrap(),
        PortBus::new(),
    );
    assert!(matches!(
        m.run(),
        Err(ExecutionError::UnmappedPort { port: 200 })
    ));
}

#[test]
fn test_strict_pld_from_unmapped_port_is_fatal() {
    let mut m = Machine::with_ports(
        Program::new(vec![pld(1, 200), hlt()]).unwrap(),
        PortBus::new(),
    );
    assert!(matches!(
        m.run(),
        Err(ExecutionError::UnmappedPort { port: 200 })
    ));
}

#[test]
fn test_strict_dps_checks_second_port_before_storing() {
    // The display covers ports 11 through 15; DPS at base 15 needs port 16.
    let mut bus = PortBus::new();
    bus.try_bind(11, Box::new(PixelDisplay::new())).unwrap();
    let mut m = Machine::with_ports(
        Program::new(vec![
            ldi(1, 9),
            Instruction::new(Mnemonic::Dps, vec![reg(1), reg(1), num(15)]),
            hlt(),
        ])
        .unwrap(),
        bus,
    );
    assert!(matches!(
        m.run(),
        Err(ExecutionError::UnmappedPort { port: 16 })
    ));
    // The first store must not have happened: the Y register is untouched.
    assert_eq!(m.cpu_mut().ports_mut().read(15).unwrap(), 0);
}

// ========== Unmapped ports, permissive ==========

#[test]
fn test_permissive_unmapped_load_reads_zero() {
    let mut m = Machine::with_ports(
        Program::new(vec![ldi(1, 9), pld(1, 200), hlt()]).unwrap(),
        PortBus::with_policy(UnmappedPortPolicy::Permissive),
    );
    m.run().unwrap();
    assert_eq!(m.cpu().register(1), 0);
    assert!(m.cpu().flag_z());
}

#[test]
fn test_permissive_unmapped_store_is_ignored() {
    let mut m = Machine::with_ports(
        Program::new(vec![
            ldi(1, 9),
            pst(1, 200),
            Instruction::new(Mnemonic::Dps, vec![reg(1), reg(1), num(254)]),
            hlt(),
        ])
        .unwrap(),
        PortBus::with_policy(UnmappedPortPolicy::Permissive),
    );
    m.run().unwrap();
    assert!(m.cpu().halted());
}
