#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

//! ## Usage
//!
//! Simple usage (allocating, no associated data):
//!
#![cfg_attr(all(feature = "aes", feature = "alloc"), doc = "```")]
#![cfg_attr(not(all(feature = "aes", feature = "alloc")), doc = "```ignore")]
//! use gcm::{Aes256Gcm, Direction, TagLength};
//!
//! let gcm = Aes256Gcm::new_from_slice(&[0x42; 32])?;
//! let iv = b"unique nonce"; // 96 bits; never reuse an IV with the same key
//!
//! let (ciphertext, tag) = gcm.encrypt(iv, b"", b"plaintext message", TagLength::MAX)?;
//! let plaintext = gcm.decrypt(iv, b"", &ciphertext, &tag)?;
//! assert_eq!(&plaintext, b"plaintext message");
//!
//! // The same message, in pieces
//! let mut buffer = *b"plaintext message";
//! let (head, tail) = buffer.split_at_mut(5);
//! let mut stream = gcm.start(Direction::Encrypt, iv, b"")?;
//! stream.update(head)?;
//! stream.update(tail)?;
//! assert_eq!(stream.finish_encrypt(TagLength::MAX)?, tag);
//! assert_eq!(&buffer[..], &ciphertext[..]);
//! # Ok::<(), gcm::Error>(())
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

mod ctr;
mod error;
mod mac;
mod stream;
mod tag;

pub use cipher;
pub use ghash;

pub use crate::{
    error::{Error, Result},
    stream::{Direction, GcmStream},
    tag::{Tag, TagLength},
};

#[cfg(feature = "aes")]
pub use aes;

use crate::{ctr::Ctr32, mac::Authenticator};
use cipher::{BlockCipher, BlockEncrypt, BlockSizeUser, Key, KeyInit, KeySizeUser, consts::U16};
use core::fmt::{self, Debug};
use ghash::{Block, GHash};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Maximum length of a plaintext or ciphertext in bytes: 2^32 - 2 blocks.
pub const P_MAX: u64 = (1 << 36) - 32;

/// Maximum length of associated data in bytes.
pub const A_MAX: u64 = (1 << 61) - 1;

/// Maximum length of an IV in bytes.
pub const IV_MAX: u64 = (1 << 61) - 1;

/// AES-GCM with a 128-bit key.
#[cfg(feature = "aes")]
pub type Aes128Gcm = Gcm<aes::Aes128>;

/// AES-GCM with a 192-bit key.
#[cfg(feature = "aes")]
pub type Aes192Gcm = Gcm<aes::Aes192>;

/// AES-GCM with a 256-bit key.
#[cfg(feature = "aes")]
pub type Aes256Gcm = Gcm<aes::Aes256>;

/// GCM engine bound to one key.
///
/// Holds the block cipher's key schedule and the GHASH subkey `H = E(K, 0^128)`, both computed
/// once at construction and never modified afterwards. Per-message state lives in the
/// [`GcmStream`] returned by [`Gcm::start`] (or on the stack of the one-shot functions), so a
/// single `Gcm` can be shared between threads and used for any number of messages.
///
/// # Security
///
/// The caller must never use the same IV twice under one key. A repeated IV reveals the XOR of
/// the two plaintexts and allows tags to be forged for the key. Nothing here detects it.
#[derive(Clone)]
pub struct Gcm<C> {
    cipher: C,

    /// GHASH keyed with `H`, with an empty accumulator
    ghash: GHash,
}

impl<C> KeySizeUser for Gcm<C>
where
    C: KeySizeUser,
{
    type KeySize = C::KeySize;
}

impl<C> Gcm<C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt + KeyInit,
{
    /// Expand `key` and derive `H`.
    #[must_use]
    pub fn new(key: &Key<C>) -> Self {
        Self::from(C::new(key))
    }

    /// Expand a key given as a slice and derive `H`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyLength`] if the block cipher does not accept keys of this
    /// length.
    pub fn new_from_slice(key: &[u8]) -> Result<Self> {
        C::new_from_slice(key)
            .map(Self::from)
            .map_err(|_| Error::InvalidKeyLength)
    }
}

impl<C> From<C> for Gcm<C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    /// Bind to an already keyed block cipher.
    fn from(cipher: C) -> Self {
        let mut h = Block::default();
        cipher.encrypt_block(&mut h);
        let ghash = GHash::new(&h);

        #[cfg(feature = "zeroize")]
        h.as_mut_slice().zeroize();

        Self { cipher, ghash }
    }
}

impl<C> Gcm<C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    /// Begin a streaming encryption or decryption of one message.
    ///
    /// Associated data is supplied here in full and authenticated before any message bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIvLength`] if `iv` is empty or too long.
    /// - [`Error::AssociatedDataTooLong`] if `associated_data` is too long.
    pub fn start(
        &self,
        direction: Direction,
        iv: &[u8],
        associated_data: &[u8],
    ) -> Result<GcmStream<'_, C>> {
        GcmStream::new(self, direction, iv, associated_data)
    }

    /// Encrypt `buffer` in place and return a tag of length `tag_len`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIvLength`] if `iv` is empty or too long.
    /// - [`Error::AssociatedDataTooLong`] or [`Error::PlaintextTooLong`] if an input exceeds
    ///   the GCM limits.
    ///
    /// `buffer` is not modified when an error is returned.
    pub fn encrypt_in_place_detached(
        &self,
        iv: &[u8],
        associated_data: &[u8],
        buffer: &mut [u8],
        tag_len: TagLength,
    ) -> Result<Tag> {
        check_lengths(associated_data, buffer.len())?;

        #[allow(unused_mut)]
        let (mut ctr, mut mask) = self.init_ctr(iv)?;
        ctr.apply_keystream(buffer);

        let mut mac = Authenticator::new(&self.ghash, associated_data);
        mac.update(buffer);
        let tag = Tag::new(&mac.finalize(), &mask, tag_len);

        #[cfg(feature = "zeroize")]
        mask.as_mut_slice().zeroize();

        Ok(tag)
    }

    /// Verify `tag` and, only if it matches, decrypt `buffer` in place.
    ///
    /// The length of `tag` selects the tag length. On any error `buffer` still holds the
    /// original ciphertext; no unauthenticated plaintext is ever written.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthenticationFailed`] if the tag does not match.
    /// - [`Error::InvalidTagLength`] if `tag` is not 4 to 16 bytes long.
    /// - [`Error::InvalidIvLength`], [`Error::AssociatedDataTooLong`] or
    ///   [`Error::PlaintextTooLong`] for out of range inputs.
    pub fn decrypt_in_place_detached(
        &self,
        iv: &[u8],
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<()> {
        let tag_len = TagLength::from_bytes(tag.len())?;
        check_lengths(associated_data, buffer.len())?;

        #[allow(unused_mut)]
        let (mut ctr, mut mask) = self.init_ctr(iv)?;

        let mut mac = Authenticator::new(&self.ghash, associated_data);
        mac.update(buffer);
        let expected = Tag::new(&mac.finalize(), &mask, tag_len);

        #[cfg(feature = "zeroize")]
        mask.as_mut_slice().zeroize();

        expected.verify(tag)?;
        ctr.apply_keystream(buffer);
        Ok(())
    }

    /// Encrypt `plaintext` into a new buffer, returning the ciphertext and its tag.
    ///
    /// # Errors
    ///
    /// Same as [`Gcm::encrypt_in_place_detached`].
    #[cfg(feature = "alloc")]
    pub fn encrypt(
        &self,
        iv: &[u8],
        associated_data: &[u8],
        plaintext: &[u8],
        tag_len: TagLength,
    ) -> Result<(Vec<u8>, Tag)> {
        let mut buffer = plaintext.to_vec();
        let tag = self.encrypt_in_place_detached(iv, associated_data, &mut buffer, tag_len)?;
        Ok((buffer, tag))
    }

    /// Verify and decrypt `ciphertext` into a new buffer.
    ///
    /// Plaintext is only returned once the tag has been verified.
    ///
    /// # Errors
    ///
    /// Same as [`Gcm::decrypt_in_place_detached`].
    #[cfg(feature = "alloc")]
    pub fn decrypt(
        &self,
        iv: &[u8],
        associated_data: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>> {
        let mut buffer = ciphertext.to_vec();
        self.decrypt_in_place_detached(iv, associated_data, &mut buffer, tag)?;
        Ok(buffer)
    }

    /// Derive `J0` for `iv` and return a keystream positioned at `J0 + 1` together with the tag
    /// mask `E(K, J0)`.
    pub(crate) fn init_ctr(&self, iv: &[u8]) -> Result<(Ctr32<'_, C>, Block)> {
        let j0 = ctr::derive_j0(&self.ghash, iv)?;
        let mut ctr = Ctr32::new(&self.cipher, &j0);
        let mask = ctr.next_block();
        Ok((ctr, mask))
    }
}

impl<C> Debug for Gcm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gcm").finish_non_exhaustive()
    }
}

fn check_lengths(associated_data: &[u8], data_len: usize) -> Result<()> {
    if associated_data.len() as u64 > A_MAX {
        return Err(Error::AssociatedDataTooLong);
    }

    if data_len as u64 > P_MAX {
        return Err(Error::PlaintextTooLong);
    }

    Ok(())
}
