//! Constant-time software implementation of GHASH for 64-bit architectures.
//! Adapted from BearSSL's `ghash_ctmul64.c`:
//!
//! <https://bearssl.org/gitweb/?p=BearSSL;a=blob;f=src/hash/ghash_ctmul64.c;hb=4b6046412>
//!
//! Copyright (c) 2016 Thomas Pornin <pornin@bolet.org>

use crate::field_element::FieldElement;

impl FieldElement {
    /// Load as `[low, high]` 64-bit limbs, where `high` holds the first eight bytes of the block.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn to_u64x2(self) -> [u64; 2] {
        let x = u128::from_be_bytes(self.0);
        [x as u64, (x >> 64) as u64]
    }

    #[inline]
    fn from_u64x2(v: [u64; 2]) -> FieldElement {
        let x = (u128::from(v[1]) << 64) | u128::from(v[0]);
        FieldElement(x.to_be_bytes())
    }
}

/// Compute the unreduced 256-bit carryless product of two 128-bit field elements.
///
/// Uses a Karatsuba decomposition in which the 128x128 multiplication is reduced to three 64x64
/// multiplications together with a bit-reversal trick to efficiently recover the high half.
#[inline]
pub(super) fn karatsuba(h: FieldElement, y: FieldElement) -> [u64; 4] {
    let [h0, h1] = h.to_u64x2();
    let [y0, y1] = y.to_u64x2();

    // Karatsuba input decomposition for H
    let h0r = h0.reverse_bits();
    let h1r = h1.reverse_bits();
    let h2 = h0 ^ h1;
    let h2r = h0r ^ h1r;

    // Karatsuba input decomposition for Y
    let y0r = y0.reverse_bits();
    let y1r = y1.reverse_bits();
    let y2 = y0 ^ y1;
    let y2r = y0r ^ y1r;

    // Perform carryless multiplications
    let z0 = bmul64(y0, h0);
    let z1 = bmul64(y1, h1);
    let mut z2 = bmul64(y2, h2);
    let mut z0h = bmul64(y0r, h0r);
    let mut z1h = bmul64(y1r, h1r);
    let mut z2h = bmul64(y2r, h2r);

    // Karatsuba recombination
    z2 ^= z0 ^ z1;
    z2h ^= z0h ^ z1h;
    z0h = z0h.reverse_bits() >> 1;
    z1h = z1h.reverse_bits() >> 1;
    z2h = z2h.reverse_bits() >> 1;

    // Assemble the final 256-bit product as 64x4
    [z0, z0h ^ z2, z1 ^ z2h, z1h]
}

/// Reduce the 256-bit carryless product of Karatsuba modulo the GHASH polynomial.
///
/// The product is first shifted left by one bit to account for the reflected bit order, then
/// folded with shifts and XORs corresponding to `x^128 + x^7 + x^2 + x + 1`.
#[inline]
pub(super) fn reduce(v: [u64; 4]) -> FieldElement {
    let [mut v0, mut v1, mut v2, mut v3] = v;

    v3 = (v3 << 1) | (v2 >> 63);
    v2 = (v2 << 1) | (v1 >> 63);
    v1 = (v1 << 1) | (v0 >> 63);
    v0 <<= 1;

    v2 ^= v0 ^ (v0 >> 1) ^ (v0 >> 2) ^ (v0 >> 7);
    v1 ^= (v0 << 63) ^ (v0 << 62) ^ (v0 << 57);
    v3 ^= v1 ^ (v1 >> 1) ^ (v1 >> 2) ^ (v1 >> 7);
    v2 ^= (v1 << 63) ^ (v1 << 62) ^ (v1 << 57);

    FieldElement::from_u64x2([v2, v3])
}

/// Carryless multiplication in GF(2)[X], truncated to the low 64-bits.
#[inline]
fn bmul64(x: u64, y: u64) -> u64 {
    super::bmul(x, y, 0x1111_1111_1111_1111)
}
