//! Galois Field (GF(2^8)) Arithmetic Tests
//!
//! Tests for Gf8 field operations including addition, multiplication,
//! division, powers, and special properties.

use rsfec::galois::Gf8;

// ============================================================================
// Basic Arithmetic Operations
// ============================================================================

#[test]
fn test_gf8_basic_operations() {
    let a = Gf8::new(5);
    let b = Gf8::new(3);

    // Test addition (XOR in GF)
    let sum = a + b;
    assert_eq!(sum.value(), 6); // 5 XOR 3 = 6

    // Test subtraction (same as addition in GF(2^n))
    let diff = a - b;
    assert_eq!(diff.value(), 6); // 5 XOR 3 = 6
}

#[test]
fn test_gf8_multiplicative_identity() {
    let a = Gf8::new(42);

    // Multiply by 1 should give identity
    assert_eq!((a * Gf8::ONE).value(), a.value());
}

#[test]
fn test_gf8_multiplication_by_zero() {
    let a = Gf8::new(42);

    // Multiply by 0 should give 0
    assert_eq!((a * Gf8::ZERO).value(), 0);
}

#[test]
fn test_gf8_known_products() {
    // 2 * 2 = 4 and 0x80 * 2 wraps through the reduction polynomial
    assert_eq!((Gf8::new(2) * Gf8::new(2)).value(), 4);
    assert_eq!((Gf8::new(0x80) * Gf8::new(2)).value(), 0x1d);
}

// ============================================================================
// Power Operations
// ============================================================================

#[test]
fn test_gf8_power_operations() {
    let a = Gf8::new(2);

    // Test power of 0
    assert_eq!(a.pow(0).value(), 1);

    // Powers of the generator are the exp table entries
    assert_eq!(a.pow(1).value(), 2);
    assert_eq!(a.pow(8).value(), 0x1d);
}

#[test]
fn test_gf8_power_of_zero() {
    let zero = Gf8::ZERO;

    // 0^n = 0 for any n > 0, and 0^0 = 1
    assert_eq!(zero.pow(0).value(), 1);
    assert_eq!(zero.pow(1).value(), 0);
    assert_eq!(zero.pow(100).value(), 0);
}

#[test]
fn test_gf8_generator_order() {
    // the multiplicative group has order 255
    assert_eq!(Gf8::GENERATOR.pow(255), Gf8::ONE);
    for exponent in 1..255 {
        assert_ne!(Gf8::GENERATOR.pow(exponent), Gf8::ONE, "exponent {exponent}");
    }
}

// ============================================================================
// Division and Inversion
// ============================================================================

#[test]
fn test_gf8_division_by_self() {
    let a = Gf8::new(42);

    // a / a = 1 (except when a = 0)
    assert_eq!(a.checked_div(a).unwrap().value(), 1);
}

#[test]
fn test_gf8_division_by_zero_fails() {
    let a = Gf8::new(42);

    assert!(a.checked_div(Gf8::ZERO).is_err());
    assert!(Gf8::ZERO.inv().is_err());
}

#[test]
fn test_gf8_zero_by_nonzero_division() {
    let a = Gf8::new(42);

    // 0 / a = 0
    assert_eq!(Gf8::ZERO.checked_div(a).unwrap().value(), 0);
}

#[test]
fn test_gf8_division_inverts_multiplication() {
    for a in 1..=255u8 {
        let ga = Gf8::new(a);
        let gb = Gf8::new(a.rotate_left(3) | 1);
        assert_eq!((ga * gb).checked_div(gb).unwrap(), ga);
    }
}

// ============================================================================
// Assignment Operations
// ============================================================================

#[test]
fn test_gf8_add_assign_operation() {
    let mut a = Gf8::new(5);
    a += Gf8::new(3);

    assert_eq!(a.value(), 6); // 5 XOR 3 = 6
}

#[test]
fn test_gf8_mul_assign_operation() {
    let a = Gf8::new(17);
    let b = Gf8::new(23);
    let mut a_copy = a;
    a_copy *= b;

    assert_eq!(a_copy.value(), (a * b).value());
}

// ============================================================================
// Special Values and Properties
// ============================================================================

#[test]
fn test_gf8_default_value() {
    let default = Gf8::default();
    assert_eq!(default.value(), 0);
}

#[test]
fn test_gf8_conversions() {
    let a: Gf8 = 0xab.into();
    assert_eq!(u8::from(a), 0xab);
    assert_eq!(format!("{a}"), "ab");
}

#[test]
fn test_gf8_polynomial_evaluation() {
    // Evaluate p(x) = x^2 + 3x + 5 at x = 7 in GF(2^8)
    let x = Gf8::new(7);
    let result = (x * x) + (x * Gf8::new(3)) + Gf8::new(5);

    // x^2 = 0x15, 3x = 9, so the sum is 0x15 ^ 0x09 ^ 0x05
    assert_eq!(result.value(), 0x15 ^ 0x09 ^ 0x05);
}
