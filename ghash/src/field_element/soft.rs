//! Portable pure Rust implementation which computes carryless GHASH multiplication over
//! GF(2^128) in constant time. Both 32-bit and 64-bit backends are available.
//!
//! Method described at: <https://www.bearssl.org/constanttime.html#ghash-for-gcm>
//!
//! GHASH reads its blocks with a reflected bit order, so the limbs loaded big-endian hold the
//! bit-reversed polynomial. The product of two bit-reversed 128-bit polynomials is the
//! bit-reversed result over 255 bits, not 256, which is why each backend shifts the unreduced
//! product left by one bit before reduction. See:
//!
//! <https://crypto.stackexchange.com/questions/66448/how-does-bearssls-gcm-modular-reduction-work/66462#66462>

// Use 64-bit backend on 64-bit targets, 32-bit backend on others
#[cfg_attr(not(target_pointer_width = "64"), path = "soft/soft32.rs")]
#[cfg_attr(target_pointer_width = "64", path = "soft/soft64.rs")]
mod soft_impl;

// Compiled alongside the 64-bit backend in tests so the two can be checked against each other.
#[cfg(all(test, target_pointer_width = "64"))]
#[path = "soft/soft32.rs"]
mod soft32;

use super::FieldElement;
use core::{
    num::Wrapping,
    ops::{BitAnd, BitOr, BitXor, Mul, Shl},
};
use soft_impl::{karatsuba, reduce};

/// Multiply two field elements and reduce modulo `x^128 + x^7 + x^2 + x + 1`.
#[inline]
pub(super) fn polymul(x: FieldElement, y: FieldElement) -> FieldElement {
    reduce(karatsuba(x, y))
}

/// Multiplication in GF(2)[X], implemented generically and wrapped as `bmul32` and `bmul64`.
///
/// Uses "holes" (sequences of zeroes) to avoid carry spilling, as specified in the mask operand
/// `m0` which should have a full-width value with the following bit pattern:
///
/// `0b100010001...0001` (e.g. `0x1111_1111u32`)
///
/// When carries do occur, they wind up in a "hole" and are subsequently masked out of the result.
#[inline]
fn bmul<T>(x: T, y: T, m0: T) -> T
where
    T: BitAnd<Output = T> + BitOr<Output = T> + Copy + Shl<u32, Output = T>,
    Wrapping<T>: BitXor<Output = Wrapping<T>> + Mul<Output = Wrapping<T>>,
{
    let m1 = m0 << 1;
    let m2 = m1 << 1;
    let m3 = m2 << 1;

    let x0 = Wrapping(x & m0);
    let x1 = Wrapping(x & m1);
    let x2 = Wrapping(x & m2);
    let x3 = Wrapping(x & m3);

    let y0 = Wrapping(y & m0);
    let y1 = Wrapping(y & m1);
    let y2 = Wrapping(y & m2);
    let y3 = Wrapping(y & m3);

    let z0 = (x0 * y0) ^ (x1 * y3) ^ (x2 * y2) ^ (x3 * y1);
    let z1 = (x0 * y1) ^ (x1 * y0) ^ (x2 * y3) ^ (x3 * y2);
    let z2 = (x0 * y2) ^ (x1 * y1) ^ (x2 * y0) ^ (x3 * y3);
    let z3 = (x0 * y3) ^ (x1 * y2) ^ (x2 * y1) ^ (x3 * y0);

    (z0.0 & m0) | (z1.0 & m1) | (z2.0 & m2) | (z3.0 & m3)
}
