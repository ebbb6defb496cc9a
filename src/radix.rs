//! Conversions between field elements and arbitrary-precision integers.
//!
//! `field_from_integer()` accepts any non-negative integer and reduces it
//! modulo p = 2^255 - 19; `integer_from_field()` returns the canonical
//! representative, in the 0 to p-1 range. For all integers `n`:
//!
//! ```text
//! integer_from_field(&field_from_integer(&n)) == n mod p
//! ```
//!
//! These functions are not constant-time, since `BigUint` arithmetic
//! is not.

use num_bigint::BigUint;

use crate::field::GF25519;

/// Converts an integer into a field element (with reduction modulo p).
pub fn field_from_integer(n: &BigUint) -> GF25519 {
    GF25519::decode_reduce(&n.to_bytes_le())
}

/// Converts a field element into its canonical integer value.
pub fn integer_from_field(e: &GF25519) -> BigUint {
    BigUint::from_bytes_le(&e.encode32())
}

/// Returns the field modulus p = 2^255 - 19 as an integer.
pub fn field_modulus() -> BigUint {
    (BigUint::from(1u32) << 255usize) - 19u32
}
