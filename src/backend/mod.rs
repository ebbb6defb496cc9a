//! Low-level arithmetic for the base field GF(2^255 - 19).
//!
//! The field element type `GF25519` uses five 51-bit limbs held in 64-bit
//! words, with 64x64->128 multiplications for limb products. The
//! following properties apply:
//!
//!  - An instance encapsulates a field element.
//!
//!  - The constant values `GF25519::ZERO` and `GF25519::ONE` contain the
//!    elements of value 0 and 1, respectively.
//!
//!  - Usual arithmetic operators can be used on field elements (`+`, `-`,
//!    `*`, and the compound assignments `+=`, `-=` and `*=`). Operators
//!    can use both the raw types, and references thereof.
//!
//!  - Function `invert(self) -> Self` computes an inverse through a fixed
//!    exponentiation chain. The "inverse" of zero is zero.
//!
//!  - Function `set_square(&mut self)` squares a field element (in place).
//!    Corresponding function `square(self) -> Self` returns the result
//!    as a new instance. Sequences of multiple squarings can be performed
//!    with `set_xsquare(&mut self, n: u32)` (and `xsquare()`).
//!
//!  - Functions `add_noreduce()`, `sub_noreduce()` and `mul2_noreduce()`
//!    skip the carry propagation step; their output has type
//!    `GF25519NotReduced`, which can only be used as an operand to a
//!    multiplication or a squaring.
//!
//!  - Function `set_cond(&mut self, a: &Self, ctl: u32)` sets
//!    the instance to the value of the other instance `a` if `ctl` is
//!    equal to 0xFFFFFFFF, or leaves the instance value unmodified if
//!    `ctl` is equal to 0x00000000. `select(a0, a1, ctl)` and
//!    `cswap(a, b, ctl)` follow the same convention.
//!
//!  - Functions `equals(self, rhs)`, `iszero(self)` and
//!    `is_negative(self)` return 0xFFFFFFFF for "true" and 0x00000000
//!    for "false". An element is "negative" when its canonical
//!    representative (in the 0 to p-1 range) is odd.
//!
//!  - Constant values can be defined with the const-qualified `w64le()`
//!    and `w64be()` functions, which take the value as four 64-bit limbs
//!    in little-endian and big-endian order, respectively. The 256-bit
//!    value is implicitly reduced modulo the field order.
//!
//!  - Function `encode32(self) -> [u8; 32]` encodes an element as
//!    exactly 32 bytes (canonical, unsigned little-endian).
//!    `decode32(buf: &[u8]) -> (Self, u32)` is the strict reverse
//!    operation; `decode_reduce(buf: &[u8]) -> Self` accepts any length
//!    and reduces the obtained integer modulo p.

mod gf25519;

pub use gf25519::{GF25519, GF25519NotReduced};

// Compute x*y over 128 bits, returned as two 64-bit words (lo, hi)
#[inline(always)]
pub(crate) const fn umull(x: u64, y: u64) -> (u64, u64) {
    let z = (x as u128) * (y as u128);
    (z as u64, (z >> 64) as u64)
}

// Return 0xFFFFFFFFFFFFFFFF if x >= 0x8000000000000000, 0 otherwise
// (i.e. take the sign bit of the signed interpretation, and expand it
// to 64 bits).
#[inline(always)]
pub(crate) const fn sgnw(x: u64) -> u64 {
    ((x as i64) >> 63) as u64
}
