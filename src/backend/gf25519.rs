use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{umull, sgnw};

/// Element of GF(2^255 - 19).
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u64; 5]);

/// Special container for "not reduced" values returned by `add_noreduce()`,
/// `sub_noreduce()` and `mul2_noreduce()`; these values can only be used
/// as operands in multiplications and squarings.
#[derive(Clone, Copy, Debug)]
pub struct GF25519NotReduced([u64; 5]);

// 2^51 - 1
const M51: u64 = 0x0007FFFFFFFFFFFF;

// The modulus is p = 2^255 - MQ.
const MQ: u64 = 19;

impl GF25519 {

    // INTERNAL FORMAT
    // ===============
    //
    // Value is split over five unsigned limbs, in base 2^51. If the limbs
    // are y0 to y4, then the value is:
    //   y0 + y1*2^51 + y2*2^102 + y3*2^153 + y4*2^204
    // The value is implicitly considered modulo p = 2^255 - 19.
    //
    // Limbs are unsigned; subtractions and negations add 2*p (whose
    // limbs are close to 2*2^51) before subtracting, so that no limb
    // ever goes below zero.
    //
    // Limb bounds:
    //  - In GF25519 instances, limbs are less than 1.07*2^51.
    //  - In GF25519NotReduced instances, limbs are less than 9.24*2^51.
    //
    // Multiplications compute the 25 products a_i*b_j with umull(),
    // after pre-shifting a_i by 6 bits and b_j by 7 bits, so that the
    // 128-bit product splits at the 2^51 boundary:
    //     low word >> 13  = (a_i*b_j) mod 2^51
    //     high word       = floor(a_i*b_j / 2^51)
    // Low parts d0..d8 and high parts h0..h8 are summed per column; since
    // 2^255 = 19 mod p, columns 5 to 8 fold back onto columns 0 to 3:
    //     e0 = d0 + 19*(h4 + d5)
    //     e1 = d1 + h0 + 19*(h5 + d6)
    //     e2 = d2 + h1 + 19*(h6 + d7)
    //     e3 = d3 + h2 + 19*(h7 + d8)
    //     e4 = d4 + h3 + 19*h8
    // With operand limbs up to 9.24*2^51, the largest high column sum
    // (h4) stays below 5*9.24^2*2^51 < 2^64, and every e_i fits in 64
    // bits as well. A final carry propagation pass brings limbs back
    // below 1.07*2^51.

    // Element encoding length (in bytes); always 32 bytes.
    pub const ENC_LEN: usize = 32;

    pub const ZERO: Self = Self([ 0, 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0 ]);

    // Modulus p, over 51-bit limbs.
    const MOD_M51: [u64; 5] = [
        0x0008000000000000 - MQ,
        0x0007FFFFFFFFFFFF,
        0x0007FFFFFFFFFFFF,
        0x0007FFFFFFFFFFFF,
        0x0007FFFFFFFFFFFF,
    ];

    // 2*p, with limb values up to 52 bits.
    const DMOD_M51: [u64; 5] = [
        (0x0008000000000000 - MQ) << 1,
        0x0007FFFFFFFFFFFF << 1,
        0x0007FFFFFFFFFFFF << 1,
        0x0007FFFFFFFFFFFF << 1,
        0x0007FFFFFFFFFFFF << 1,
    ];

    // Create an element from a 256-bit value (implicitly reduced modulo
    // p) provided as four 64-bit limbs (in low-to-high order).
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        // The top bit (2^255) wraps around as +19 on the lowest limb.
        let y0 = (x0 & M51) + (MQ & sgnw(x3));
        let y1 = (x0 >> 51) | ((x1 << 13) & M51);
        let y2 = (x1 >> 38) | ((x2 << 26) & M51);
        let y3 = (x2 >> 25) | ((x3 << 39) & M51);
        let y4 = (x3 >> 12) & M51;
        Self([ y0, y1, y2, y3, y4 ])
    }

    // Create an element from a 256-bit value (implicitly reduced modulo
    // p) provided as four 64-bit limbs (in high-to-low order).
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::w64le(x0, x1, x2, x3)
    }

    #[inline(always)]
    pub fn from_u32(x: u32) -> Self {
        Self::w64le(x as u64, 0, 0, 0)
    }

    #[inline(always)]
    pub fn from_u64(x: u64) -> Self {
        Self::w64le(x, 0, 0, 0)
    }

    // Set this value to the provided limbs, with one carry propagation
    // pass. Input limbs must be less than 2^64; output limbs are less
    // than 2^51 + 19*2^13 < 1.07*2^51.
    #[inline(always)]
    fn set_carry_propagate(&mut self,
        d0: u64, d1: u64, d2: u64, d3: u64, d4: u64)
    {
        let h0 = d0 >> 51;
        let h1 = d1 >> 51;
        let h2 = d2 >> 51;
        let h3 = d3 >> 51;
        let h4 = d4 >> 51;
        self.0[0] = (d0 & M51) + (h4 * MQ);
        self.0[1] = (d1 & M51) + h0;
        self.0[2] = (d2 & M51) + h1;
        self.0[3] = (d3 & M51) + h2;
        self.0[4] = (d4 & M51) + h3;
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        let d0 = self.0[0] + rhs.0[0];
        let d1 = self.0[1] + rhs.0[1];
        let d2 = self.0[2] + rhs.0[2];
        let d3 = self.0[3] + rhs.0[3];
        let d4 = self.0[4] + rhs.0[4];
        self.set_carry_propagate(d0, d1, d2, d3, d4);
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        let d0 = (self.0[0] + Self::DMOD_M51[0]) - rhs.0[0];
        let d1 = (self.0[1] + Self::DMOD_M51[1]) - rhs.0[1];
        let d2 = (self.0[2] + Self::DMOD_M51[2]) - rhs.0[2];
        let d3 = (self.0[3] + Self::DMOD_M51[3]) - rhs.0[3];
        let d4 = (self.0[4] + Self::DMOD_M51[4]) - rhs.0[4];
        self.set_carry_propagate(d0, d1, d2, d3, d4);
    }

    // Negate this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        let d0 = Self::DMOD_M51[0] - self.0[0];
        let d1 = Self::DMOD_M51[1] - self.0[1];
        let d2 = Self::DMOD_M51[2] - self.0[2];
        let d3 = Self::DMOD_M51[3] - self.0[3];
        let d4 = Self::DMOD_M51[4] - self.0[4];
        self.set_carry_propagate(d0, d1, d2, d3, d4);
    }

    /// Return self + rhs (no reduction).
    #[inline(always)]
    pub fn add_noreduce(self, rhs: &Self) -> GF25519NotReduced {
        GF25519NotReduced([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
            self.0[4] + rhs.0[4],
        ])
    }

    /// Return self - rhs (no reduction).
    #[inline(always)]
    pub fn sub_noreduce(self, rhs: &Self) -> GF25519NotReduced {
        GF25519NotReduced([
            (self.0[0] + Self::DMOD_M51[0]) - rhs.0[0],
            (self.0[1] + Self::DMOD_M51[1]) - rhs.0[1],
            (self.0[2] + Self::DMOD_M51[2]) - rhs.0[2],
            (self.0[3] + Self::DMOD_M51[3]) - rhs.0[3],
            (self.0[4] + Self::DMOD_M51[4]) - rhs.0[4],
        ])
    }

    /// Return 2*self (no reduction).
    #[inline(always)]
    pub fn mul2_noreduce(self) -> GF25519NotReduced {
        GF25519NotReduced([
            self.0[0] << 1,
            self.0[1] << 1,
            self.0[2] << 1,
            self.0[3] << 1,
            self.0[4] << 1,
        ])
    }

    // Multiply this value by 2.
    #[inline]
    pub fn set_mul2(&mut self) {
        let d0 = self.0[0] << 1;
        let d1 = self.0[1] << 1;
        let d2 = self.0[2] << 1;
        let d3 = self.0[3] << 1;
        let d4 = self.0[4] << 1;
        self.set_carry_propagate(d0, d1, d2, d3, d4);
    }

    #[inline(always)]
    pub fn mul2(self) -> Self {
        let mut r = self;
        r.set_mul2();
        r
    }

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..5 {
            self.0[i] ^= cw & (self.0[i] ^ a.0[i]);
        }
    }

    // Return a0 (if ctl == 0) or a1 (if ctl == 0xFFFFFFFF).
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    // Exchange a and b if ctl == 0xFFFFFFFF; leave them untouched if
    // ctl == 0. No other value of ctl is allowed.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        for i in 0..5 {
            let t = cw & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    #[inline(always)]
    fn set_mul(&mut self, rhs: &Self) {
        // See comments at the start for range analysis.
        let a0 = self.0[0] << 6;
        let a1 = self.0[1] << 6;
        let a2 = self.0[2] << 6;
        let a3 = self.0[3] << 6;
        let a4 = self.0[4] << 6;
        let b0 = rhs.0[0] << 7;
        let b1 = rhs.0[1] << 7;
        let b2 = rhs.0[2] << 7;
        let b3 = rhs.0[3] << 7;
        let b4 = rhs.0[4] << 7;

        let (c00, h00) = umull(a0, b0);
        let (c01, h01) = umull(a0, b1);
        let (c02, h02) = umull(a0, b2);
        let (c03, h03) = umull(a0, b3);
        let (c04, h04) = umull(a0, b4);
        let (c10, h10) = umull(a1, b0);
        let (c11, h11) = umull(a1, b1);
        let (c12, h12) = umull(a1, b2);
        let (c13, h13) = umull(a1, b3);
        let (c14, h14) = umull(a1, b4);
        let (c20, h20) = umull(a2, b0);
        let (c21, h21) = umull(a2, b1);
        let (c22, h22) = umull(a2, b2);
        let (c23, h23) = umull(a2, b3);
        let (c24, h24) = umull(a2, b4);
        let (c30, h30) = umull(a3, b0);
        let (c31, h31) = umull(a3, b1);
        let (c32, h32) = umull(a3, b2);
        let (c33, h33) = umull(a3, b3);
        let (c34, h34) = umull(a3, b4);
        let (c40, h40) = umull(a4, b0);
        let (c41, h41) = umull(a4, b1);
        let (c42, h42) = umull(a4, b2);
        let (c43, h43) = umull(a4, b3);
        let (c44, h44) = umull(a4, b4);

        let d0 = c00 >> 13;
        let d1 = (c01 >> 13) + (c10 >> 13);
        let d2 = (c02 >> 13) + (c11 >> 13) + (c20 >> 13);
        let d3 = (c03 >> 13) + (c12 >> 13) + (c21 >> 13) + (c30 >> 13);
        let d4 = (c04 >> 13) + (c13 >> 13) + (c22 >> 13) + (c31 >> 13)
               + (c40 >> 13);
        let d5 = (c14 >> 13) + (c23 >> 13) + (c32 >> 13) + (c41 >> 13);
        let d6 = (c24 >> 13) + (c33 >> 13) + (c42 >> 13);
        let d7 = (c34 >> 13) + (c43 >> 13);
        let d8 = c44 >> 13;

        let h0 = h00;
        let h1 = h01 + h10;
        let h2 = h02 + h11 + h20;
        let h3 = h03 + h12 + h21 + h30;
        let h4 = h04 + h13 + h22 + h31 + h40;
        let h5 = h14 + h23 + h32 + h41;
        let h6 = h24 + h33 + h42;
        let h7 = h34 + h43;
        let h8 = h44;

        self.set_fold(d0, d1, d2, d3, d4, d5, d6, d7, d8,
            h0, h1, h2, h3, h4, h5, h6, h7, h8);
    }

    // Square this value (in place).
    #[inline(always)]
    pub fn set_square(&mut self) {
        // Same as set_mul(), but cross products a_i*a_j (i != j) are
        // computed once, with one operand doubled (the z* words are
        // twice the s* words).
        let s0 = self.0[0] << 6;
        let s1 = self.0[1] << 6;
        let s2 = self.0[2] << 6;
        let s3 = self.0[3] << 6;
        let s4 = self.0[4] << 6;
        let z0 = self.0[0] << 7;
        let z1 = self.0[1] << 7;
        let z2 = self.0[2] << 7;
        let z3 = self.0[3] << 7;
        let z4 = self.0[4] << 7;

        let (c00, h00) = umull(s0, z0);
        let (c01, h01) = umull(z0, z1);
        let (c02, h02) = umull(z0, z2);
        let (c03, h03) = umull(z0, z3);
        let (c04, h04) = umull(z0, z4);
        let (c11, h11) = umull(s1, z1);
        let (c12, h12) = umull(z1, z2);
        let (c13, h13) = umull(z1, z3);
        let (c14, h14) = umull(z1, z4);
        let (c22, h22) = umull(s2, z2);
        let (c23, h23) = umull(z2, z3);
        let (c24, h24) = umull(z2, z4);
        let (c33, h33) = umull(s3, z3);
        let (c34, h34) = umull(z3, z4);
        let (c44, h44) = umull(s4, z4);

        let d0 = c00 >> 13;
        let d1 = c01 >> 13;
        let d2 = (c02 >> 13) + (c11 >> 13);
        let d3 = (c03 >> 13) + (c12 >> 13);
        let d4 = (c04 >> 13) + (c13 >> 13) + (c22 >> 13);
        let d5 = (c14 >> 13) + (c23 >> 13);
        let d6 = (c24 >> 13) + (c33 >> 13);
        let d7 = c34 >> 13;
        let d8 = c44 >> 13;

        let h0 = h00;
        let h1 = h01;
        let h2 = h02 + h11;
        let h3 = h03 + h12;
        let h4 = h04 + h13 + h22;
        let h5 = h14 + h23;
        let h6 = h24 + h33;
        let h7 = h34;
        let h8 = h44;

        self.set_fold(d0, d1, d2, d3, d4, d5, d6, d7, d8,
            h0, h1, h2, h3, h4, h5, h6, h7, h8);
    }

    // Fold the nine low (d*) and high (h*) column sums of a product back
    // into five limbs, using 2^255 = 19 mod p.
    #[inline(always)]
    #[allow(clippy::too_many_arguments)]
    fn set_fold(&mut self,
        d0: u64, d1: u64, d2: u64, d3: u64, d4: u64,
        d5: u64, d6: u64, d7: u64, d8: u64,
        h0: u64, h1: u64, h2: u64, h3: u64, h4: u64,
        h5: u64, h6: u64, h7: u64, h8: u64)
    {
        let e0 = d0 + MQ * (h4 + d5);
        let e1 = d1 + h0 + MQ * (h5 + d6);
        let e2 = d2 + h1 + MQ * (h6 + d7);
        let e3 = d3 + h2 + MQ * (h7 + d8);
        let e4 = d4 + h3 + MQ * h8;
        self.set_carry_propagate(e0, e1, e2, e3, e4);
    }

    // Square this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    // Square this value n times (in place).
    #[inline(always)]
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    // Square this value n times.
    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    // Invert this value (in place). Zero is "inverted" into zero.
    //
    // This raises the value to the power p - 2 = 2^255 - 21, with a
    // fixed chain of 254 squarings and 11 multiplications.
    pub fn set_invert(&mut self) {
        let z = *self;
        let z2 = z.square();
        let z9 = z2.xsquare(2) * z;
        let z11 = z9 * z2;
        // z_k_0 = z^(2^k - 1)
        let z_5_0 = z11.square() * z9;
        let z_10_0 = z_5_0.xsquare(5) * z_5_0;
        let z_20_0 = z_10_0.xsquare(10) * z_10_0;
        let z_40_0 = z_20_0.xsquare(20) * z_20_0;
        let z_50_0 = z_40_0.xsquare(10) * z_10_0;
        let z_100_0 = z_50_0.xsquare(50) * z_50_0;
        let z_200_0 = z_100_0.xsquare(100) * z_100_0;
        let z_250_0 = z_200_0.xsquare(50) * z_50_0;
        *self = z_250_0.xsquare(5) * z11;
    }

    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    // Fully reduce the value.
    #[inline]
    fn set_normalized(&mut self) {
        // Add MQ, and propagate carries.
        let a0 = self.0[0] + MQ;
        let a1 = self.0[1] + (a0 >> 51);
        let a2 = self.0[2] + (a1 >> 51);
        let a3 = self.0[3] + (a2 >> 51);
        let a4 = self.0[4] + (a3 >> 51);
        let b0 = (a0 & M51) + MQ * (a4 >> 51);
        // MQ*(a4 >> 51) < 2^18, so the carry into b1 is 0 or 1.
        let b1 = (a1 & M51) + (b0 >> 51);
        let b2 = (a2 & M51) + (b1 >> 51);
        let b3 = (a3 & M51) + (b2 >> 51);
        let b4 = (a4 & M51) + (b3 >> 51);
        // b4 may exceed 2^51-1 only if b0 produced a carry, in which case
        // b0 % 2^51 is small and the carry stops there.
        let c0 = (b0 & M51) + (MQ & (b4 >> 51).wrapping_neg());
        let c1 = b1 & M51;
        let c2 = b2 & M51;
        let c3 = b3 & M51;
        let c4 = b4 & M51;

        // Subtract MQ; propagate the borrow.
        let d0 = c0.wrapping_sub(MQ);
        let d1 = c1.wrapping_sub(d0 >> 63);
        let d2 = c2.wrapping_sub(d1 >> 63);
        let d3 = c3.wrapping_sub(d2 >> 63);
        let d4 = c4.wrapping_sub(d3 >> 63);

        // On a final borrow, add back the modulus: d0 is then between
        // -19 and -1 and d1..d4 are all -1, so limbs d1..d4 simply
        // become 2^51 - 1.
        let w = sgnw(d4);
        self.0[0] = d0.wrapping_add(w & Self::MOD_M51[0]) & M51;
        self.0[1] = (d1 | w) & M51;
        self.0[2] = (d2 | w) & M51;
        self.0[3] = (d3 | w) & M51;
        self.0[4] = (d4 | w) & M51;
    }

    // Canonical value as four 64-bit limbs (low-to-high order).
    fn to_limbs64(self) -> [u64; 4] {
        let mut x = self;
        x.set_normalized();
        let x0 = x.0[0] | (x.0[1] << 51);
        let x1 = (x.0[1] >> 13) | (x.0[2] << 38);
        let x2 = (x.0[2] >> 26) | (x.0[3] << 25);
        let x3 = (x.0[3] >> 39) | (x.0[4] << 12);
        [x0, x1, x2, x3]
    }

    /// Returns the canonical (fully reduced) form of this element.
    ///
    /// Each limb of the returned element is less than 2^51, and the
    /// represented integer is in the 0 to p-1 range.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut r = self;
        r.set_normalized();
        r
    }

    // Equality check between two field elements (constant-time);
    // returned value is 0xFFFFFFFF on equality, 0 otherwise.
    #[inline(always)]
    pub fn equals(self, rhs: Self) -> u32 {
        (self - rhs).iszero()
    }

    // Compare this value with zero (constant-time); returned value
    // is 0xFFFFFFFF if this element is zero, 0 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        let x = self.normalized();
        let t = x.0[0] | x.0[1] | x.0[2] | x.0[3] | x.0[4];
        let tz = t | t.wrapping_neg();
        ((tz >> 63) as u32).wrapping_sub(1)
    }

    // "Negative" elements are those whose canonical representative is
    // odd. Returned value is 0xFFFFFFFF for such elements, 0 otherwise.
    #[inline]
    pub fn is_negative(self) -> u32 {
        ((self.to_limbs64()[0] as u32) & 1).wrapping_neg()
    }

    // Encode this value over exactly 32 bytes. Encoding is always
    // canonical (little-endian encoding of the value in the 0..p-1 range,
    // top bit of the last byte is always 0).
    #[inline(always)]
    pub fn encode32(self) -> [u8; Self::ENC_LEN] {
        let k = self.to_limbs64();
        let mut d = [0u8; Self::ENC_LEN];
        d[ 0.. 8].copy_from_slice(&k[0].to_le_bytes());
        d[ 8..16].copy_from_slice(&k[1].to_le_bytes());
        d[16..24].copy_from_slice(&k[2].to_le_bytes());
        d[24..32].copy_from_slice(&k[3].to_le_bytes());
        d
    }

    // Decode the field element from the provided bytes. If the source
    // slice does not have length exactly 32 bytes, or if the encoding
    // is non-canonical (i.e. does not represent an integer in the 0
    // to p-1 range), then this element is set to zero, and 0 is returned.
    // Otherwise, this element is set to the decoded value, and 0xFFFFFFFF
    // is returned.
    pub fn set_decode32(&mut self, buf: &[u8]) -> u32 {
        if buf.len() != Self::ENC_LEN {
            *self = Self::ZERO;
            return 0;
        }

        // No reduction here; top limb may use 52 bits.
        let d0 = dec64le(&buf[ 0.. 8]);
        let d1 = dec64le(&buf[ 8..16]);
        let d2 = dec64le(&buf[16..24]);
        let d3 = dec64le(&buf[24..32]);
        self.0[0] = d0 & M51;
        self.0[1] = (d0 >> 51) | ((d1 << 13) & M51);
        self.0[2] = (d1 >> 38) | ((d2 << 26) & M51);
        self.0[3] = (d2 >> 25) | ((d3 << 39) & M51);
        self.0[4] = d3 >> 12;

        // Subtracting p must yield a borrow for a canonical encoding.
        let cc = self.0[0].wrapping_sub(Self::MOD_M51[0]) >> 63;
        let cc = self.0[1].wrapping_sub(Self::MOD_M51[1] + cc) >> 63;
        let cc = self.0[2].wrapping_sub(Self::MOD_M51[2] + cc) >> 63;
        let cc = self.0[3].wrapping_sub(Self::MOD_M51[3] + cc) >> 63;
        let cc = self.0[4].wrapping_sub(Self::MOD_M51[4] + cc) >> 63;

        // Clear the value if not canonical.
        let cc = cc.wrapping_neg();
        for i in 0..5 {
            self.0[i] &= cc;
        }
        cc as u32
    }

    // Decode a field element from 32 bytes. On success, this returns
    // (r, 0xFFFFFFFF). If the slice length is not 32, or the encoding is
    // not canonical, this returns (0, 0).
    #[inline]
    pub fn decode32(buf: &[u8]) -> (Self, u32) {
        let mut r = Self::ZERO;
        let cc = r.set_decode32(buf);
        (r, cc)
    }

    // Decode a field element from 32 bytes, as `decode32()`, but
    // reporting failure with `None`. Side-channel analysis may reveal
    // to outsiders whether the decoding succeeded.
    #[inline(always)]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let (r, cc) = Self::decode32(buf);
        if cc != 0 {
            Some(r)
        } else {
            None
        }
    }

    // Decode 32 bytes (unsigned little-endian) with implicit reduction.
    #[inline(always)]
    fn set_decode32_reduce(&mut self, buf: &[u8]) {
        debug_assert!(buf.len() == 32);
        *self = Self::w64le(
            dec64le(&buf[ 0.. 8]), dec64le(&buf[ 8..16]),
            dec64le(&buf[16..24]), dec64le(&buf[24..32]));
    }

    // Decode a field element from some bytes. The bytes are interpreted
    // in unsigned little-endian convention, and the resulting integer
    // is reduced modulo p. This process never fails, and accepts inputs
    // of any length (including empty slices, which decode to zero).
    pub fn set_decode_reduce(&mut self, buf: &[u8]) {
        *self = Self::ZERO;
        let mut n = buf.len();
        if n == 0 {
            return;
        }

        // Start with the top chunk, which may be partial.
        if (n & 31) != 0 {
            let k = n & !31usize;
            let mut tmp = [0u8; 32];
            tmp[..(n - k)].copy_from_slice(&buf[k..]);
            n = k;
            self.set_decode32_reduce(&tmp);
        } else {
            n -= 32;
            self.set_decode32_reduce(&buf[n..]);
        }

        // Horner on 256-bit chunks: 2^256 = 38 mod p.
        while n > 0 {
            let k = n - 32;
            let mut x = Self::ZERO;
            x.set_decode32_reduce(&buf[k..k + 32]);
            let d0 = self.0[0] * (2 * MQ) + x.0[0];
            let d1 = self.0[1] * (2 * MQ) + x.0[1];
            let d2 = self.0[2] * (2 * MQ) + x.0[2];
            let d3 = self.0[3] * (2 * MQ) + x.0[3];
            let d4 = self.0[4] * (2 * MQ) + x.0[4];
            self.set_carry_propagate(d0, d1, d2, d3, d4);
            n = k;
        }
    }

    #[inline(always)]
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut r = Self::ZERO;
        r.set_decode_reduce(buf);
        r
    }
}

// Decode a 64-bit integer from exactly 8 bytes (little-endian).
#[inline(always)]
fn dec64le(buf: &[u8]) -> u64 {
    let mut tmp = [0u8; 8];
    tmp.copy_from_slice(buf);
    u64::from_le_bytes(tmp)
}

impl GF25519NotReduced {

    pub fn square(self) -> GF25519 {
        // GF25519::set_square() tolerates unreduced limbs
        let mut r = GF25519(self.0);
        r.set_square();
        r
    }
}

// ========================================================================
// Operator traits. The value/value form does the work; reference forms
// forward to it (field elements are Copy).

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $lhs:ty, $rhs:ty) => {
        impl $imp<&$rhs> for $lhs {
            type Output = GF25519;

            #[inline(always)]
            fn $method(self, other: &$rhs) -> GF25519 {
                <$lhs as $imp<$rhs>>::$method(self, *other)
            }
        }

        impl $imp<$rhs> for &$lhs {
            type Output = GF25519;

            #[inline(always)]
            fn $method(self, other: $rhs) -> GF25519 {
                <$lhs as $imp<$rhs>>::$method(*self, other)
            }
        }

        impl $imp<&$rhs> for &$lhs {
            type Output = GF25519;

            #[inline(always)]
            fn $method(self, other: &$rhs) -> GF25519 {
                <$lhs as $imp<$rhs>>::$method(*self, *other)
            }
        }
    };
}

impl Add<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Sub<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Mul<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

// GF25519::set_mul() tolerates unreduced limbs on both operands.

impl Mul<GF25519NotReduced> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519NotReduced) -> GF25519 {
        let mut r = self;
        r.set_mul(&GF25519(other.0));
        r
    }
}

impl Mul<GF25519> for GF25519NotReduced {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519) -> GF25519 {
        let mut r = GF25519(self.0);
        r.set_mul(&other);
        r
    }
}

impl Mul<GF25519NotReduced> for GF25519NotReduced {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519NotReduced) -> GF25519 {
        let mut r = GF25519(self.0);
        r.set_mul(&GF25519(other.0));
        r
    }
}

forward_binop!(Add, add, GF25519, GF25519);
forward_binop!(Sub, sub, GF25519, GF25519);
forward_binop!(Mul, mul, GF25519, GF25519);
forward_binop!(Mul, mul, GF25519, GF25519NotReduced);
forward_binop!(Mul, mul, GF25519NotReduced, GF25519);
forward_binop!(Mul, mul, GF25519NotReduced, GF25519NotReduced);

impl AddAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn add_assign(&mut self, other: GF25519) {
        self.set_add(&other);
    }
}

impl AddAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn add_assign(&mut self, other: &GF25519) {
        self.set_add(other);
    }
}

impl SubAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn sub_assign(&mut self, other: GF25519) {
        self.set_sub(&other);
    }
}

impl SubAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn sub_assign(&mut self, other: &GF25519) {
        self.set_sub(other);
    }
}

impl MulAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn mul_assign(&mut self, other: GF25519) {
        self.set_mul(&other);
    }
}

impl MulAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn mul_assign(&mut self, other: &GF25519) {
        self.set_mul(other);
    }
}

impl MulAssign<GF25519NotReduced> for GF25519 {
    #[inline(always)]
    fn mul_assign(&mut self, other: GF25519NotReduced) {
        self.set_mul(&GF25519(other.0));
    }
}

impl Neg for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        let mut r = *self;
        r.set_neg();
        r
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{GF25519, M51};
    use num_bigint::BigUint;
    use sha2::{Sha256, Digest};

    fn modulus() -> BigUint {
        (BigUint::from(1u32) << 255usize) - 19u32
    }

    fn to_big(a: GF25519) -> BigUint {
        BigUint::from_bytes_le(&a.encode32())
    }

    // va, vb and vx must be 32 bytes each in length
    fn check_gf_ops(va: &[u8], vb: &[u8], vx: &[u8]) {
        let zp = modulus();
        let zp4 = &zp << 2usize;

        let a = GF25519::decode_reduce(va);
        let b = GF25519::decode_reduce(vb);
        let za = BigUint::from_bytes_le(va);
        let zb = BigUint::from_bytes_le(vb);

        assert!(to_big(a) == &za % &zp);
        assert!(to_big(a + b) == (&za + &zb) % &zp);
        assert!(to_big(a - b) == ((&zp4 + &za) - &zb) % &zp);
        assert!(to_big(-a) == (&zp4 - &za) % &zp);
        assert!(to_big(a * b) == (&za * &zb) % &zp);
        assert!(to_big(a.square()) == (&za * &za) % &zp);
        assert!(to_big(a.mul2()) == (&za << 1usize) % &zp);
        assert!(to_big(a.xsquare(3)) == za.modpow(&BigUint::from(8u32), &zp));

        // Not-reduced operands chained into products.
        let c = a.add_noreduce(&b) * a.sub_noreduce(&b);
        assert!(to_big(c) == ((&za + &zb) * ((&zp4 + &za) - &zb)) % &zp);
        let c = a.mul2_noreduce().square();
        assert!(to_big(c) == ((&za << 1usize) * (&za << 1usize)) % &zp);
        let c = a.add_noreduce(&b) * b;
        assert!(to_big(c) == ((&za + &zb) * &zb) % &zp);

        let (e, cc) = GF25519::decode32(va);
        if cc != 0 {
            assert!(cc == 0xFFFFFFFF);
            assert!(e.encode32() == va);
        } else {
            assert!(e.encode32() == [0u8; 32]);
        }

        let mut tmp = [0u8; 96];
        tmp[0..32].copy_from_slice(va);
        tmp[32..64].copy_from_slice(vb);
        tmp[64..96].copy_from_slice(vx);
        for k in 0..97 {
            let c = GF25519::decode_reduce(&tmp[0..k]);
            let zd = BigUint::from_bytes_le(&tmp[0..k]) % &zp;
            assert!(to_big(c) == zd);
        }

        let c = a.invert();
        if a.iszero() != 0 {
            assert!(c.iszero() == 0xFFFFFFFF);
        } else {
            assert!((a * c).equals(GF25519::ONE) == 0xFFFFFFFF);
            assert!(to_big(c) == za.modpow(&(&zp - 2u32), &zp));
        }

        let neg = if (&za % &zp).bit(0) { 0xFFFFFFFF } else { 0 };
        assert!(a.is_negative() == neg);

        let mut x = a;
        let mut y = b;
        GF25519::cswap(&mut x, &mut y, 0);
        assert!(x.equals(a) == 0xFFFFFFFF && y.equals(b) == 0xFFFFFFFF);
        GF25519::cswap(&mut x, &mut y, 0xFFFFFFFF);
        assert!(x.equals(b) == 0xFFFFFFFF && y.equals(a) == 0xFFFFFFFF);
        assert!(GF25519::select(&a, &b, 0).equals(a) == 0xFFFFFFFF);
        assert!(GF25519::select(&a, &b, 0xFFFFFFFF).equals(b) == 0xFFFFFFFF);
    }

    #[test]
    fn gf25519_ops() {
        let mut va = [0u8; 32];
        let mut vb = [0u8; 32];
        let mut vx = [0u8; 32];
        check_gf_ops(&va, &vb, &vx);
        assert!(GF25519::decode_reduce(&va).iszero() == 0xFFFFFFFF);
        assert!(GF25519::decode_reduce(&va).equals(GF25519::decode_reduce(&vb)) == 0xFFFFFFFF);
        for i in 0..32 {
            va[i] = 0xFF;
            vb[i] = 0xFF;
            vx[i] = 0xFF;
        }
        check_gf_ops(&va, &vb, &vx);
        assert!(GF25519::decode_reduce(&va).iszero() == 0);

        // p and 2*p both decode (with reduction) to zero.
        va[0] = 0xED;
        va[31] = 0x7F;
        assert!(GF25519::decode_reduce(&va).iszero() == 0xFFFFFFFF);
        assert!(GF25519::decode32(&va).1 == 0);
        va[0] = 0xDA;
        va[31] = 0xFF;
        assert!(GF25519::decode_reduce(&va).iszero() == 0xFFFFFFFF);

        let mut sh = Sha256::new();
        for i in 0..300 {
            sh.update(((3 * i) as u64).to_le_bytes());
            let va = sh.finalize_reset();
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let vb = sh.finalize_reset();
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let vx = sh.finalize_reset();
            check_gf_ops(&va, &vb, &vx);
            assert!(GF25519::decode_reduce(&va).iszero() == 0);
            assert!(GF25519::decode_reduce(&va).equals(GF25519::decode_reduce(&vb)) == 0);
        }
    }

    #[test]
    fn small_values() {
        let mut sh = Sha256::new();
        for i in 0..20u64 {
            sh.update(i.to_le_bytes());
            let v = sh.finalize_reset();
            let mut t = [0u8; 8];
            t.copy_from_slice(&v[..8]);
            let x = u64::from_le_bytes(t);
            let a = GF25519::from_u64(x);
            assert!(a.encode32().len() == GF25519::ENC_LEN);
            assert!(a.equals(GF25519::decode_reduce(&t)) == 0xFFFFFFFF);
            assert!(BigUint::from_bytes_le(&a.encode32()) == BigUint::from(x));

            // Low 32 bits agree with from_u32().
            let b = GF25519::from_u64(x & 0xFFFFFFFF);
            assert!(b.equals(GF25519::from_u32(x as u32)) == 0xFFFFFFFF);
        }
        let m = GF25519::from_u64(u64::MAX);
        assert!((m + GF25519::ONE).encode32()[8] == 1);
    }

    #[test]
    fn invert_zero() {
        assert!(GF25519::ZERO.invert().iszero() == 0xFFFFFFFF);
        assert!(GF25519::ONE.invert().equals(GF25519::ONE) == 0xFFFFFFFF);
        let m1 = -GF25519::ONE;
        assert!(m1.invert().equals(m1) == 0xFFFFFFFF);
    }

    #[test]
    fn normalized_limbs() {
        let mut sh = Sha256::new();
        for i in 0..50u64 {
            sh.update(i.to_le_bytes());
            let v = sh.finalize_reset();
            let a = GF25519::decode_reduce(&v);
            let b = (a - GF25519::ONE + GF25519::ONE).normalized();
            for j in 0..5 {
                assert!(b.0[j] <= M51);
            }
            let (c, cc) = GF25519::decode32(&a.encode32());
            assert!(cc == 0xFFFFFFFF);
            assert!(c.0 == b.0);
        }
        let m1 = (-GF25519::ONE).normalized();
        assert!(m1.0 == [M51 - 19, M51, M51, M51, M51]);
    }
}
