//! GHASH field element implementation.

mod soft;

use crate::{BLOCK_SIZE, Block};
use core::{
    fmt::{self, Debug},
    ops::{Add, AddAssign, Mul, MulAssign},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// An element in GHASH's field.
///
/// This type represents an element of the binary field GF(2^128) modulo the irreducible polynomial
/// `x^128 + x^7 + x^2 + x + 1` as described in [NIST SP 800-38D §6.3].
///
/// # Representation
///
/// The element is stored as the 16 bytes of a GHASH block, exactly as they appear on the wire.
/// GHASH uses a "reflected" bit order: the most significant bit of the first byte is the
/// coefficient of `x^0`, and the least significant bit of the last byte is the coefficient of
/// `x^127`. The multiplicative identity is therefore `80 00 .. 00`.
///
/// Arithmetic in GHASH's field has the following properties:
/// - All arithmetic operations are performed modulo the polynomial above.
/// - Addition is equivalent to the XOR operation applied to the two field elements
/// - Multiplication is carryless
///
/// [NIST SP 800-38D §6.3]: https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38d.pdf
#[derive(Clone, Copy, Default)]
#[cfg_attr(test, derive(Eq, PartialEq))]
#[repr(C, align(16))]
pub struct FieldElement([u8; BLOCK_SIZE]);

impl FieldElement {
    /// The multiplicative identity.
    pub const ONE: Self = {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes[0] = 0x80;
        Self(bytes)
    };

    /// Serialize this field element as a GHASH block.
    #[inline]
    #[must_use]
    pub fn to_bytes(self) -> [u8; BLOCK_SIZE] {
        self.0
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(")?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl From<[u8; BLOCK_SIZE]> for FieldElement {
    #[inline]
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<&Block> for FieldElement {
    #[inline]
    fn from(block: &Block) -> Self {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes.copy_from_slice(block);
        Self(bytes)
    }
}

impl From<Block> for FieldElement {
    #[inline]
    fn from(block: Block) -> Self {
        Self::from(&block)
    }
}

impl From<FieldElement> for Block {
    #[inline]
    fn from(fe: FieldElement) -> Self {
        Block::from(fe.0)
    }
}

impl From<FieldElement> for [u8; BLOCK_SIZE] {
    #[inline]
    fn from(fe: FieldElement) -> Self {
        fe.0
    }
}

impl Add for FieldElement {
    type Output = Self;

    /// Adds two GHASH field elements.
    ///
    /// In GHASH's field, addition is the equivalent operation to XOR.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let x = u128::from_ne_bytes(self.0) ^ u128::from_ne_bytes(rhs.0);
        Self(x.to_ne_bytes())
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for FieldElement {
    type Output = Self;

    /// Perform carryless multiplication within GHASH's field modulo its polynomial.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        soft::polymul(self, rhs)
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
