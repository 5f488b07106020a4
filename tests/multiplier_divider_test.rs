//! Tests for the arithmetic port devices through the bus.

use pipe8::devices::{Divider, Multiplier};
use pipe8::PortBus;

fn bus() -> PortBus {
    let mut bus = PortBus::new();
    bus.try_bind(0, Box::new(Multiplier::new())).unwrap();
    bus.try_bind(2, Box::new(Divider::new())).unwrap();
    bus
}

#[test]
fn test_multiplier_product_bytes() {
    let mut bus = bus();
    bus.write(0, 100).unwrap();
    bus.write(1, 200).unwrap();
    // 100 * 200 = 20000 = 0x4E20
    assert_eq!(bus.read(0).unwrap(), 32);
    assert_eq!(bus.read(1).unwrap(), 78);
}

#[test]
fn test_multiplier_reads_are_stable() {
    let mut bus = bus();
    bus.write(0, 13).unwrap();
    bus.write(1, 3).unwrap();
    assert_eq!(bus.read(0).unwrap(), 39);
    assert_eq!(bus.read(0).unwrap(), 39, "reads do not consume the product");
}

#[test]
fn test_multiplier_updating_one_factor() {
    let mut bus = bus();
    bus.write(0, 10).unwrap();
    bus.write(1, 10).unwrap();
    assert_eq!(bus.read(0).unwrap(), 100);
    bus.write(1, 20).unwrap();
    assert_eq!(bus.read(0).unwrap(), 200);
}

#[test]
fn test_divider_quotient_and_remainder() {
    let mut bus = bus();
    bus.write(2, 7).unwrap(); // divisor
    bus.write(3, 100).unwrap(); // dividend
    assert_eq!(bus.read(2).unwrap(), 14);
    assert_eq!(bus.read(3).unwrap(), 2);
}

#[test]
fn test_divider_by_zero() {
    let mut bus = bus();
    bus.write(2, 0).unwrap();
    bus.write(3, 5).unwrap();
    assert_eq!(bus.read(2).unwrap(), 0xFF);
    assert_eq!(bus.read(3).unwrap(), 5);
}

#[test]
fn test_divider_exact_division() {
    let mut bus = bus();
    bus.write(2, 8).unwrap();
    bus.write(3, 64).unwrap();
    assert_eq!(bus.read(2).unwrap(), 8);
    assert_eq!(bus.read(3).unwrap(), 0);
}
