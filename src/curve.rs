//! Generic elliptic curve interface.
//!
//! A `Curve` exposes the group law and scalar multiplication on points
//! given by their affine coordinates, as arbitrary-precision integers.
//! Implementations are free to use any internal representation; they
//! convert from and to affine coordinates at the boundary.
//!
//! Points are encoded in uncompressed format: a byte of value 0x04,
//! followed by the x and y coordinates, each in unsigned big-endian
//! convention over exactly `byte_len()` bytes (with left padding).
//! There is no encoding for points that have no affine representation.

#![allow(non_snake_case)]

use alloc::vec::Vec;
use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Tag byte for uncompressed point encodings.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// Parameters of a curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    /// Field modulus.
    pub p: BigUint,
    /// Order of the subgroup generated by the base point.
    pub n: BigUint,
    /// Curve equation constant (for a twisted Edwards curve, `d`).
    pub b: BigUint,
    /// Base point x coordinate.
    pub gx: BigUint,
    /// Base point y coordinate.
    pub gy: BigUint,
    /// Size of the field modulus, in bits.
    pub bit_size: usize,
    /// Canonical name of the curve.
    pub name: &'static str,
}

impl CurveParams {

    /// Returns the length (in bytes) of an encoded coordinate.
    pub fn byte_len(&self) -> usize {
        (self.bit_size + 7) >> 3
    }

    /// Returns the base point, as an affine point.
    pub fn generator(&self) -> AffinePoint {
        AffinePoint::new(self.gx.clone(), self.gy.clone())
    }
}

/// A point in affine coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: BigUint,
    pub y: BigUint,
}

impl AffinePoint {

    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }
}

/// Operations on an elliptic curve, on affine points.
///
/// Scalars are integers in unsigned big-endian convention; they may have
/// any length (an empty slice is zero), and are not reduced modulo the
/// subgroup order. Input points to `add()`, `double()` and
/// `scalar_mult()` are assumed to be on the curve; results for other
/// inputs are unspecified (but no panic occurs).
pub trait Curve {

    /// Returns the curve parameters.
    fn params(&self) -> &CurveParams;

    /// Tests whether the provided point is on the curve. Coordinates
    /// that are not lower than the field modulus are rejected.
    fn is_on_curve(&self, P: &AffinePoint) -> bool;

    /// Returns the sum of two points.
    fn add(&self, P1: &AffinePoint, P2: &AffinePoint) -> AffinePoint;

    /// Returns the double of a point.
    fn double(&self, P: &AffinePoint) -> AffinePoint;

    /// Returns `k*P`.
    fn scalar_mult(&self, P: &AffinePoint, k: &[u8]) -> AffinePoint;

    /// Returns `k*G`, for the curve base point `G`.
    fn scalar_base_mult(&self, k: &[u8]) -> AffinePoint;
}

/// Encodes a point in uncompressed format.
///
/// Coordinates are reduced modulo the field modulus before encoding.
pub fn marshal<C: Curve + ?Sized>(curve: &C, P: &AffinePoint) -> Vec<u8> {
    let params = curve.params();
    let len = params.byte_len();
    let mut buf = Vec::with_capacity(1 + 2 * len);
    buf.push(UNCOMPRESSED_TAG);
    for v in [&P.x, &P.y] {
        let b = (v % &params.p).to_bytes_be();
        buf.resize(buf.len() + len - b.len(), 0);
        buf.extend_from_slice(&b);
    }
    buf
}

/// Decodes a point in uncompressed format.
///
/// The encoding must have the exact length and the 0x04 tag; both
/// coordinates must be lower than the field modulus, and the point must
/// be on the curve.
pub fn unmarshal<C: Curve + ?Sized>(curve: &C, data: &[u8]) -> Result<AffinePoint> {
    let params = curve.params();
    let len = params.byte_len();
    if data.len() != 1 + 2 * len {
        return Err(Error::InvalidLength {
            expected: 1 + 2 * len,
            actual: data.len(),
        });
    }
    if data[0] != UNCOMPRESSED_TAG {
        return Err(Error::InvalidTag(data[0]));
    }
    let x = BigUint::from_bytes_be(&data[1..1 + len]);
    let y = BigUint::from_bytes_be(&data[1 + len..]);
    if x >= params.p || y >= params.p {
        return Err(Error::CoordinateOutOfRange);
    }
    let P = AffinePoint::new(x, y);
    if !curve.is_on_curve(&P) {
        return Err(Error::NotOnCurve);
    }
    Ok(P)
}

#[cfg(test)]
mod tests {

    use super::{AffinePoint, Curve, marshal, unmarshal};
    use crate::ed25519::Ed25519Curve;
    use crate::error::Error;
    use num_bigint::BigUint;
    use sha2::{Sha256, Digest};

    #[test]
    fn marshal_generator() {
        let c = Ed25519Curve::new();
        let G = c.params().generator();
        let enc = marshal(&c, &G);
        assert!(enc.len() == 65);
        assert!(enc[0] == 0x04);
        assert!(enc[1..33] == hex::decode(
            "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a")
            .unwrap()[..]);
        assert!(enc[33..] == hex::decode(
            "6666666666666666666666666666666666666666666666666666666666666658")
            .unwrap()[..]);
        assert!(unmarshal(&c, &enc).unwrap() == G);

        // Neutral (0, 1): x is all zeros, y is left-padded.
        let N = AffinePoint::new(BigUint::from(0u32), BigUint::from(1u32));
        let enc = marshal(&c, &N);
        assert!(enc.len() == 65);
        assert!(enc[1..64].iter().all(|&b| b == 0));
        assert!(enc[64] == 1);
        assert!(unmarshal(&c, &enc).unwrap() == N);
    }

    #[test]
    fn marshal_round_trip() {
        let c = Ed25519Curve::new();
        let mut sh = Sha256::new();
        for i in 0..100u64 {
            sh.update(i.to_le_bytes());
            let k = sh.finalize_reset();
            let P = c.scalar_base_mult(&k);
            let enc = marshal(&c, &P);
            assert!(enc.len() == 65);
            let Q = unmarshal(&c, &enc).unwrap();
            assert!(P == Q);
            assert!(c.is_on_curve(&Q));
        }
    }

    #[test]
    fn marshal_reduces() {
        let c = Ed25519Curve::new();
        let G = c.params().generator();
        let p = &c.params().p;
        let H = AffinePoint::new(&G.x + p, &G.y + p);
        assert!(marshal(&c, &H) == marshal(&c, &G));
    }

    #[test]
    fn unmarshal_errors() {
        let c = Ed25519Curve::new();
        let G = c.params().generator();
        let enc = marshal(&c, &G);

        assert!(unmarshal(&c, &[]) == Err(Error::InvalidLength {
            expected: 65, actual: 0 }));
        assert!(unmarshal(&c, &enc[..64]) == Err(Error::InvalidLength {
            expected: 65, actual: 64 }));
        let mut long = enc.clone();
        long.push(0);
        assert!(unmarshal(&c, &long) == Err(Error::InvalidLength {
            expected: 65, actual: 66 }));

        for tag in [0x00u8, 0x02, 0x03, 0x05, 0xFF] {
            let mut bad = enc.clone();
            bad[0] = tag;
            assert!(unmarshal(&c, &bad) == Err(Error::InvalidTag(tag)));
        }

        // x = p (would reduce to 0)
        let mut bad = enc.clone();
        bad[1..33].copy_from_slice(&c.params().p.to_bytes_be());
        assert!(unmarshal(&c, &bad) == Err(Error::CoordinateOutOfRange));
        let mut bad = enc.clone();
        bad[33..].iter_mut().for_each(|b| *b = 0xFF);
        assert!(unmarshal(&c, &bad) == Err(Error::CoordinateOutOfRange));

        let mut bad = enc.clone();
        bad[64] ^= 0x01;
        assert!(unmarshal(&c, &bad) == Err(Error::NotOnCurve));
        let mut zero = [0u8; 65];
        zero[0] = 0x04;
        assert!(unmarshal(&c, &zero) == Err(Error::NotOnCurve));
    }

    #[test]
    fn generic_use() {
        // The interface is usable through a trait object.
        let c = Ed25519Curve::new();
        let dc: &dyn Curve = &c;
        let P = dc.scalar_base_mult(&[7u8]);
        let enc = marshal(dc, &P);
        assert!(unmarshal(dc, &enc).unwrap() == P);
        assert!(dc.params().name == "ed25519");
    }
}
