//! Edwards25519 curve implementation.
//!
//! This module implements group operations on the twisted Edwards curve
//! of equation `-x^2 + y^2 = 1 + d*x^2*y^2`, over the finite field
//! GF(2^255 - 19), for the constant `d` = -121665/121666. This curve is
//! described in [RFC 7748]; it is the curve used by the Ed25519
//! signature algorithm ([RFC 8032]).
//!
//! The curve has order `8*L` for a given prime integer `L` (which is
//! slightly greater than 2^252). A conventional base point is defined,
//! that generates the subgroup of order `L`.
//!
//! Three point representations are used:
//!
//!  - `Point`: extended coordinates (X:Y:Z:T), with `x = X/Z`,
//!    `y = Y/Z` and `T = X*Y/Z`. This is the general-purpose type. The
//!    neutral is (0:1:1:0).
//!
//!  - `PointCompleted`: output of the addition and doubling formulas,
//!    with `x = X/Z` and `y = Y/T`; it is converted back to extended
//!    coordinates right away.
//!
//!  - `PointCached`: (Y+X, Y-X, Z, 2*d*T), a redundant form that makes
//!    additions cheaper when the same point is added many times (window
//!    entries in scalar multiplication, and the base point table).
//!
//! The addition law is complete: it works for all inputs, including
//! the neutral, doublings, and a point added to its opposite, without
//! any special-case branch.
//!
//! Scalars are provided as 32 bytes (unsigned little-endian convention),
//! i.e. integers in the 0 to 2^256-1 range. They are NOT reduced modulo
//! `L`; for points outside of the subgroup of order `L`, the full integer
//! value matters. Multiplication of the base point (`Point::mulgen()`)
//! uses a table of precomputed multiples, which is computed on first use
//! and then shared (read-only) by all threads.
//!
//! The `Ed25519Curve` type implements the generic `Curve` interface
//! (affine `BigUint` coordinates, big-endian scalars of any length) on
//! top of these operations.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

use crate::curve::{AffinePoint, Curve, CurveParams};
use crate::field::GF25519;
use crate::radix::{field_from_integer, field_modulus, integer_from_field};

/// A point on the twisted Edwards curve edwards25519.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) X: GF25519,
    pub(crate) Y: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T: GF25519,
}

/// Intermediate result of an addition or doubling.
///
/// Affine coordinates are `x = X/Z` and `y = Y/T`.
#[derive(Clone, Copy, Debug)]
pub struct PointCompleted {
    pub(crate) X: GF25519,
    pub(crate) Y: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T: GF25519,
}

/// A point in cached format (Y+X, Y-X, Z, 2*d*T).
#[derive(Clone, Copy, Debug)]
pub struct PointCached {
    pub(crate) ypx: GF25519,
    pub(crate) ymx: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) t2d: GF25519,
}

// Number of entries in a window: multiples 1*P to 8*P.
const WIN_SIZE: usize = 8;

// Number of windows in the base point table: window j contains the
// multiples of 256^j*B.
const BASE_WINDOWS: usize = 33;

impl Point {

    /// The group neutral (identity point) in the curve.
    ///
    /// Affine coordinates of the neutral are (0,1).
    pub const NEUTRAL: Self = Self {
        X: GF25519::ZERO,
        Y: GF25519::ONE,
        Z: GF25519::ONE,
        T: GF25519::ZERO,
    };

    /// The conventional base point in the curve.
    ///
    /// This point generates the subgroup of prime order L.
    pub const BASE: Self = Self {
        X: GF25519::w64be(
            0x216936D3CD6E53FE, 0xC0A4E231FDD6DC5C,
            0x692CC7609525A7B2, 0xC9562D608F25D51A),
        Y: GF25519::w64be(
            0x6666666666666666, 0x6666666666666666,
            0x6666666666666666, 0x6666666666666658),
        Z: GF25519::ONE,
        T: GF25519::w64be(
            0x67875F0FD78B7665, 0x66EA4E8E64ABE37D,
            0x20F09F80775152F5, 0x6DDE8AB3A5B7DDA3),
    };

    /// Curve equation parameter d = -121665 / 121666.
    pub(crate) const D: GF25519 = GF25519::w64be(
        0x52036CEE2B6FFE73,
        0x8CC740797779E898,
        0x00700A4D4141D8AB,
        0x75EB4DCA135978A3,
    );

    /// Double of the curve equation parameter: 2*d
    pub(crate) const D2: GF25519 = GF25519::w64be(
        0x2406D9DC56DFFCE7,
        0x198E80F2EEF3D130,
        0x00E0149A8283B156,
        0xEBD69B9426B2F159,
    );

    /// Creates a point from its affine coordinates.
    ///
    /// The coordinates are NOT checked; use `is_on_curve_affine()` if
    /// they come from an untrusted source.
    pub fn from_affine(x: &GF25519, y: &GF25519) -> Self {
        Self { X: *x, Y: *y, Z: GF25519::ONE, T: x * y }
    }

    /// Returns the affine coordinates (x, y) of this point.
    ///
    /// This uses one inversion; for a valid point, Z is never zero.
    pub fn to_affine(self) -> (GF25519, GF25519) {
        let iZ = self.Z.invert();
        (self.X * iZ, self.Y * iZ)
    }

    /// Tests whether the affine coordinates (x, y) fulfill the curve
    /// equation.
    ///
    /// Returned value is 0xFFFFFFFF if the point is on the curve,
    /// 0x00000000 otherwise. The pair (0,0) is not on the curve.
    pub fn is_on_curve_affine(x: &GF25519, y: &GF25519) -> u32 {
        let xx = x.square();
        let yy = y.square();
        (yy - xx).equals(GF25519::ONE + Self::D * xx * yy)
    }

    /// Converts this point to cached format.
    #[inline]
    pub fn to_cached(self) -> PointCached {
        PointCached {
            ypx: self.Y + self.X,
            ymx: self.Y - self.X,
            Z: self.Z,
            t2d: self.T * Self::D2,
        }
    }

    /// Adds a point in cached format; the result is not yet converted
    /// back to extended coordinates.
    #[inline]
    pub fn add_cached(self, rhs: &PointCached) -> PointCompleted {
        let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);

        // Formulas from RFC 8032, section 5.1.4.
        let A = Y1.sub_noreduce(X1) * rhs.ymx;
        let B = Y1.add_noreduce(X1) * rhs.ypx;
        let C = T1 * rhs.t2d;
        let D = Z1.mul2_noreduce() * rhs.Z;
        PointCompleted { X: B - A, Y: B + A, Z: D + C, T: D - C }
    }

    /// Subtracts a point in cached format; the result is not yet
    /// converted back to extended coordinates.
    #[inline]
    pub fn sub_cached(self, rhs: &PointCached) -> PointCompleted {
        let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);

        // Same as add_cached(), with the negation of rhs merged in:
        // ypx and ymx are swapped, and t2d is negated.
        let A = Y1.sub_noreduce(X1) * rhs.ypx;
        let B = Y1.add_noreduce(X1) * rhs.ymx;
        let C = T1 * rhs.t2d;
        let D = Z1.mul2_noreduce() * rhs.Z;
        PointCompleted { X: B - A, Y: B + A, Z: D - C, T: D + C }
    }

    /// Adds a point in cached format to this point (in place).
    #[inline(always)]
    pub fn set_add_cached(&mut self, rhs: &PointCached) {
        *self = self.add_cached(rhs).to_extended();
    }

    /// Subtracts a point in cached format from this point (in place).
    #[inline(always)]
    pub fn set_sub_cached(&mut self, rhs: &PointCached) {
        *self = self.sub_cached(rhs).to_extended();
    }

    /// Adds another point (`rhs`) to this point.
    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        self.set_add_cached(&rhs.to_cached());
    }

    /// Subtracts another point (`rhs`) from this point.
    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        self.set_sub_cached(&rhs.to_cached());
    }

    // Doubling formulas; they do not use the T coordinate of the source.
    #[inline]
    fn double_completed(self) -> PointCompleted {
        let (X, Y, Z) = (&self.X, &self.Y, &self.Z);
        let XX = X.square();
        let YY = Y.square();
        let B = Z.square().mul2();
        let AA = X.add_noreduce(Y).square();
        let S = YY + XX;
        let D = YY - XX;
        PointCompleted { X: AA - S, Y: S, Z: D, T: B - D }
    }

    /// Doubles this point (in place).
    #[inline]
    pub fn set_double(&mut self) {
        *self = self.double_completed().to_extended();
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Doubles this point n times (in place).
    pub fn set_xdouble(&mut self, n: u32) {
        if n == 0 {
            return;
        }

        // Intermediate doublings skip the computation of T, since the
        // doubling formulas do not read it.
        for _ in 1..n {
            let P = self.double_completed();
            self.X = P.X * P.T;
            self.Y = P.Y * P.Z;
            self.Z = P.Z * P.T;
        }
        self.set_double();
    }

    /// Doubles this point n times.
    #[inline(always)]
    pub fn xdouble(self, n: u32) -> Self {
        let mut r = self;
        r.set_xdouble(n);
        r
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.X.set_neg();
        self.T.set_neg();
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        (self.X * rhs.Z).equals(rhs.X * self.Z)
        & (self.Y * rhs.Z).equals(rhs.Y * self.Z)
    }

    /// Tests whether this point is the neutral (identity point on the
    /// curve).
    ///
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000
    /// otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        // The neutral is the only point with y == 1.
        self.Y.equals(self.Z)
    }

    /// Conditionally copies the provided point (`P`) into `self`.
    ///
    ///  - If `ctl` = 0xFFFFFFFF, then the value of `P` is copied into `self`.
    ///
    ///  - If `ctl` = 0x00000000, then the value of `self` is unchanged.
    ///
    /// `ctl` MUST be equal to 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
        self.T.set_cond(&P.T, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` = 0x00000000) or `P1` (if
    /// `ctl` = 0xFFFFFFFF).
    ///
    /// Value `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Conditionally negates this point.
    ///
    /// This point is negated if `ctl` = 0xFFFFFFFF, but kept unchanged
    /// if `ctl` = 0x00000000. `ctl` MUST be equal to 0x00000000 or
    /// 0xFFFFFFFF.
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        self.X.set_cond(&-self.X, ctl);
        self.T.set_cond(&-self.T, ctl);
    }

    /// Recodes a 256-bit scalar into 65 signed digits in base 16.
    ///
    /// Digits 0 to 63 are in -8..+7; the top digit (64) is 0 or 1.
    fn recode_scalar(n: &[u8; 32]) -> [i8; 65] {
        let mut sd = [0i8; 65];
        for i in 0..32 {
            sd[2 * i] = (n[i] & 0x0F) as i8;
            sd[2 * i + 1] = (n[i] >> 4) as i8;
        }
        let mut cc = 0i8;
        for i in 0..64 {
            let d = sd[i] + cc;
            cc = (d + 8) >> 4;
            sd[i] = d - (cc << 4);
        }
        sd[64] = cc;
        sd
    }

    /// Builds a window of cached multiples: win[i] = (i+1)*P.
    fn make_window(P: &Self) -> [PointCached; WIN_SIZE] {
        let mut win = [PointCached::NEUTRAL; WIN_SIZE];
        let mut Q = *P;
        win[0] = Q.to_cached();
        for i in 1..WIN_SIZE {
            Q.set_add_cached(&win[0]);
            win[i] = Q.to_cached();
        }
        win
    }

    /// Multiplies this point by a scalar (in place).
    ///
    /// The scalar is an integer in the 0 to 2^256-1 range, in unsigned
    /// little-endian convention. This operation is constant-time with
    /// regard to both the point and the scalar value: one addition is
    /// performed for every digit, zero digits included (they add the
    /// neutral).
    pub fn set_mul(&mut self, n: &[u8; 32]) {
        let win = Self::make_window(self);
        let sd = Self::recode_scalar(n);

        // Process the digits in high-to-low order.
        *self = Self::NEUTRAL;
        self.set_add_cached(&PointCached::lookup(&win, sd[64]));
        for i in (0..64).rev() {
            self.set_xdouble(4);
            self.set_add_cached(&PointCached::lookup(&win, sd[i]));
        }
    }

    /// Multiplies this point by a scalar (32 bytes, little-endian).
    #[inline(always)]
    pub fn mul(self, n: &[u8; 32]) -> Self {
        let mut r = self;
        r.set_mul(n);
        r
    }

    /// Sets this point by multiplying the conventional generator by the
    /// provided scalar (32 bytes, little-endian).
    ///
    /// This operation is constant-time. It is faster than using the
    /// generic multiplication on `Self::BASE`.
    pub fn set_mulgen(&mut self, n: &[u8; 32]) {
        let sd = Self::recode_scalar(n);
        let tab = &*BASE_TABLE;

        // n = sum_j (sd[2*j] + 16*sd[2*j+1])*256^j. Window j of the table
        // contains the multiples of 256^j*B; odd digits are accumulated
        // first, then multiplied by 16, then even digits are added.
        *self = Self::NEUTRAL;
        for i in (1..64).step_by(2) {
            self.set_add_cached(&PointCached::lookup(&tab[i >> 1], sd[i]));
        }
        self.set_xdouble(4);
        for i in (0..65).step_by(2) {
            self.set_add_cached(&PointCached::lookup(&tab[i >> 1], sd[i]));
        }
    }

    /// Creates a point by multiplying the conventional generator by the
    /// provided scalar.
    #[inline]
    pub fn mulgen(n: &[u8; 32]) -> Self {
        let mut P = Self::NEUTRAL;
        P.set_mulgen(n);
        P
    }

    // Computes k*P for a big-endian scalar k of any length. The scalar
    // is split into 256-bit chunks, combined with Horner's rule; the
    // provided closure multiplies P by one chunk (little-endian).
    fn mul_be_chunks<F>(k: &[u8], mul: F) -> Self
        where F: Fn(&[u8; 32]) -> Self
    {
        let mut chunks = k.rchunks(32).rev();
        let mut R = match chunks.next() {
            Some(c) => mul(&chunk_le(c)),
            None => return Self::NEUTRAL,
        };
        for c in chunks {
            R.set_xdouble(256);
            R += mul(&chunk_le(c));
        }
        R
    }
}

// Converts a big-endian chunk of at most 32 bytes into a little-endian
// 32-byte array.
fn chunk_le(c: &[u8]) -> [u8; 32] {
    let mut t = [0u8; 32];
    for (d, s) in t.iter_mut().zip(c.iter().rev()) {
        *d = *s;
    }
    t
}

impl PointCompleted {

    /// Converts this point to extended coordinates.
    #[inline(always)]
    pub fn to_extended(self) -> Point {
        Point {
            X: self.X * self.T,
            Y: self.Y * self.Z,
            Z: self.Z * self.T,
            T: self.X * self.Y,
        }
    }
}

impl PointCached {

    /// The neutral point, in cached format.
    pub const NEUTRAL: Self = Self {
        ypx: GF25519::ONE,
        ymx: GF25519::ONE,
        Z: GF25519::ONE,
        t2d: GF25519::ZERO,
    };

    #[inline]
    fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.ypx.set_cond(&P.ypx, ctl);
        self.ymx.set_cond(&P.ymx, ctl);
        self.Z.set_cond(&P.Z, ctl);
        self.t2d.set_cond(&P.t2d, ctl);
    }

    /// Conditionally negates this point (if `ctl` = 0xFFFFFFFF).
    ///
    /// Negation in cached format exchanges ypx and ymx, and negates t2d.
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        GF25519::cswap(&mut self.ypx, &mut self.ymx, ctl);
        self.t2d.set_cond(&-self.t2d, ctl);
    }

    /// Lookups a point from a window, with sign handling (constant-time).
    ///
    /// `win[i]` contains `(i+1)*P`; the returned value is `k*P`, for
    /// `k` in -8..+8.
    fn lookup(win: &[Self; WIN_SIZE], k: i8) -> Self {
        // Split k into its sign s (0xFFFFFFFF for negative) and
        // absolute value (f).
        let s = ((k as i32) >> 8) as u32;
        let f = ((k as u32) ^ s).wrapping_sub(s);
        let mut P = Self::NEUTRAL;
        for i in 0..WIN_SIZE {
            // Values a-b and b-a both have their high bit equal to 0 only
            // if a == b.
            let j = (i as u32) + 1;
            let w = !(f.wrapping_sub(j) | j.wrapping_sub(f));
            let w = ((w as i32) >> 31) as u32;
            P.set_cond(&win[i], w);
        }
        P.set_condneg(s);
        P
    }
}

// Multiples of the base point: BASE_TABLE[j][i] = (i+1)*256^j*B.
static BASE_TABLE: Lazy<[[PointCached; WIN_SIZE]; BASE_WINDOWS]> =
    Lazy::new(|| {
        let mut tab = [[PointCached::NEUTRAL; WIN_SIZE]; BASE_WINDOWS];
        let mut Bj = Point::BASE;
        for win in tab.iter_mut() {
            *win = Point::make_window(&Bj);
            Bj.set_xdouble(8);
        }
        tab
    });

// ========================================================================
// Operators on points, with or without references.

impl Add<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: Point) {
        self.set_add(&other);
    }
}

impl AddAssign<&Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: &Point) {
        self.set_add(other);
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: Point) {
        self.set_sub(&other);
    }
}

impl SubAssign<&Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: &Point) {
        self.set_sub(other);
    }
}

// ========================================================================

/// Edwards25519 behind the generic `Curve` interface.
///
/// Points are affine pairs of `BigUint` values. The neutral point is
/// (0, 1). Scalars are big-endian byte strings of any length; they are
/// used as plain integers, without reduction modulo the subgroup order
/// `n` (callers that need canonical scalars must reduce them).
#[derive(Clone, Debug)]
pub struct Ed25519Curve {
    params: CurveParams,
}

impl Ed25519Curve {

    /// Creates the curve object, with its parameters.
    pub fn new() -> Self {
        // L = 2^252 + 27742317777372353535851937790883648493
        let n = (BigUint::from(1u32) << 252usize)
            + BigUint::from(27742317777372353535851937790883648493u128);
        let params = CurveParams {
            p: field_modulus(),
            n,
            b: integer_from_field(&Point::D),
            gx: integer_from_field(&Point::BASE.X),
            gy: integer_from_field(&Point::BASE.Y),
            bit_size: 255,
            name: "ed25519",
        };
        Self { params }
    }

    /// Converts affine coordinates into an extended point (coordinates
    /// are reduced modulo p, and not validated).
    fn to_point(P: &AffinePoint) -> Point {
        Point::from_affine(&field_from_integer(&P.x), &field_from_integer(&P.y))
    }

    fn to_affine_point(P: &Point) -> AffinePoint {
        let (x, y) = P.to_affine();
        AffinePoint::new(integer_from_field(&x), integer_from_field(&y))
    }
}

impl Default for Ed25519Curve {
    fn default() -> Self {
        Self::new()
    }
}

impl Curve for Ed25519Curve {

    fn params(&self) -> &CurveParams {
        &self.params
    }

    fn is_on_curve(&self, P: &AffinePoint) -> bool {
        if P.x >= self.params.p || P.y >= self.params.p {
            return false;
        }
        let x = field_from_integer(&P.x);
        let y = field_from_integer(&P.y);
        Point::is_on_curve_affine(&x, &y) != 0
    }

    fn add(&self, P1: &AffinePoint, P2: &AffinePoint) -> AffinePoint {
        Self::to_affine_point(&(Self::to_point(P1) + Self::to_point(P2)))
    }

    fn double(&self, P: &AffinePoint) -> AffinePoint {
        Self::to_affine_point(&Self::to_point(P).double())
    }

    fn scalar_mult(&self, P: &AffinePoint, k: &[u8]) -> AffinePoint {
        let Q = Self::to_point(P);
        Self::to_affine_point(&Point::mul_be_chunks(k, |c| Q.mul(c)))
    }

    fn scalar_base_mult(&self, k: &[u8]) -> AffinePoint {
        Self::to_affine_point(&Point::mul_be_chunks(k, Point::mulgen))
    }
}

// ========================================================================
