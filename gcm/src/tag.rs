//! Authentication tags and their permitted lengths.

use crate::{Error, Result};
use core::{
    fmt::{self, Debug},
    ops::Deref,
};
use ghash::{BLOCK_SIZE, Block};
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Length of an authentication tag.
///
/// Any whole number of bytes from 4 (32 bits) to 16 (128 bits) is accepted. Short tags weaken
/// forgery resistance considerably; see NIST SP 800-38D Appendix C before going below 96 bits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TagLength(u8);

impl TagLength {
    /// Shortest permitted tag: 32 bits.
    pub const MIN: Self = Self(4);

    /// Full-length tag: 128 bits.
    pub const MAX: Self = Self(BLOCK_SIZE as u8);

    /// Tag length from a number of bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTagLength`] unless `bits` is a multiple of 8 in `32..=128`.
    pub const fn from_bits(bits: u32) -> Result<Self> {
        if bits % 8 != 0 {
            return Err(Error::InvalidTagLength);
        }
        Self::from_bytes((bits / 8) as usize)
    }

    /// Tag length from a number of bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTagLength`] unless `len` is in `4..=16`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_bytes(len: usize) -> Result<Self> {
        if len < Self::MIN.0 as usize || len > Self::MAX.0 as usize {
            return Err(Error::InvalidTagLength);
        }
        Ok(Self(len as u8))
    }

    /// Length in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0 as u32 * 8
    }

    /// Length in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        self.0 as usize
    }
}

impl Default for TagLength {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u32> for TagLength {
    type Error = Error;

    /// Equivalent to [`TagLength::from_bits`].
    fn try_from(bits: u32) -> Result<Self> {
        Self::from_bits(bits)
    }
}

/// Authentication tag produced by encryption, possibly truncated.
///
/// A truncated tag is the most significant (leftmost) bytes of the full 128-bit tag.
/// Equality is evaluated in constant time.
#[derive(Clone, Copy)]
pub struct Tag {
    bytes: [u8; BLOCK_SIZE],
    len: TagLength,
}

impl Tag {
    /// Tag from the GHASH output `s` and the encrypted initial counter block `mask`.
    pub(crate) fn new(s: &Block, mask: &Block, len: TagLength) -> Self {
        let mut bytes = [0u8; BLOCK_SIZE];
        for ((out, a), b) in bytes.iter_mut().zip(s).zip(mask) {
            *out = a ^ b;
        }

        // keep trailing bytes zero so the unused tail never carries tag material
        bytes[len.bytes()..].fill(0);
        Self { bytes, len }
    }

    /// Length of this tag.
    #[must_use]
    pub fn length(&self) -> TagLength {
        self.len
    }

    /// Tag bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len.bytes()]
    }

    /// Shorten this tag to its leftmost `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTagLength`] if `len` is longer than this tag.
    pub fn truncate(&self, len: TagLength) -> Result<Self> {
        if len > self.len {
            return Err(Error::InvalidTagLength);
        }

        let mut bytes = self.bytes;
        bytes[len.bytes()..].fill(0);
        Ok(Self { bytes, len })
    }

    /// Compare against a received tag in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] if the tags differ in length or content.
    pub fn verify(&self, received: &[u8]) -> Result<()> {
        if self.as_slice().ct_eq(received).into() {
            Ok(())
        } else {
            Err(Error::AuthenticationFailed)
        }
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Deref for Tag {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl ConstantTimeEq for Tag {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_slice().ct_eq(other.as_slice())
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Tag {}

impl Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(")?;
        for byte in self.as_slice() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Tag {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}
