#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

#[cfg(feature = "hazmat")]
pub mod hazmat;

mod field_element;

pub use universal_hash;

use crate::field_element::FieldElement;
use universal_hash::{
    KeyInit, Reset, UhfBackend, UhfClosure, UniversalHash,
    consts::{U1, U16},
    crypto_common::{BlockSizeUser, KeySizeUser, ParBlocksSizeUser},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Size of a GHASH block in bytes
pub const BLOCK_SIZE: usize = 16;

/// Size of a GHASH key in bytes
pub const KEY_SIZE: usize = 16;

/// GHASH keys (16-bytes)
pub type Key = universal_hash::Key<GHash>;

/// GHASH blocks (16-bytes)
pub type Block = universal_hash::Block<GHash>;

/// GHASH tags (16-bytes)
pub type Tag = universal_hash::Block<GHash>;

/// **GHASH**: universal hash over GF(2^128) used by AES-GCM.
///
/// Each input block `X` is folded into the accumulator as `Y = (Y + X) * H`, where addition is
/// XOR and multiplication is carryless modulo `x^128 + x^7 + x^2 + x + 1`.
///
/// Cloning a freshly keyed instance is the intended way to start a new computation under the
/// same `H` without recomputing anything key dependent.
#[derive(Clone)]
pub struct GHash {
    /// Hash subkey `H`
    h: FieldElement,

    /// Accumulator `Y`
    y: FieldElement,
}

impl GHash {
    /// Initialize GHASH with the given `H` field element (i.e. hash subkey).
    #[must_use]
    pub fn new(h: &Key) -> Self {
        Self {
            h: FieldElement::from(h),
            y: FieldElement::default(),
        }
    }
}

impl KeySizeUser for GHash {
    type KeySize = U16;
}

impl KeyInit for GHash {
    /// Initialize GHASH with the given `H` field element
    #[inline]
    fn new(h: &Key) -> Self {
        Self::new(h)
    }
}

impl BlockSizeUser for GHash {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for GHash {
    type ParBlocksSize = U1;
}

impl UhfBackend for GHash {
    #[inline]
    fn proc_block(&mut self, x: &Block) {
        self.y = (self.y + FieldElement::from(x)) * self.h;
    }
}

impl UniversalHash for GHash {
    fn update_with_backend(&mut self, f: impl UhfClosure<BlockSize = Self::BlockSize>) {
        f.call(self);
    }

    /// Get GHASH output
    #[inline]
    fn finalize(self) -> Tag {
        self.y.into()
    }
}

impl Reset for GHash {
    fn reset(&mut self) {
        self.y = FieldElement::default();
    }
}

#[cfg(feature = "zeroize")]
impl Drop for GHash {
    fn drop(&mut self) {
        self.h.zeroize();
        self.y.zeroize();
    }
}

opaque_debug::implement!(GHash);
