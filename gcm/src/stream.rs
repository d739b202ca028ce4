//! Streaming encryption and decryption of a single message.

use crate::{
    A_MAX, Error, Gcm, P_MAX, Result, Tag, TagLength,
    ctr::Ctr32,
    mac::Authenticator,
};
use cipher::{BlockCipher, BlockEncrypt, BlockSizeUser, consts::U16};
use core::fmt::{self, Debug};
use ghash::Block;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Which way a [`GcmStream`] transforms its input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,

    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// A message in progress: created by [`Gcm::start`], fed with [`GcmStream::update`] and
/// consumed by [`GcmStream::finish_encrypt`] or [`GcmStream::finish_decrypt`].
///
/// Each stream owns its counter, GHASH accumulator and byte counts; the key schedule and `H`
/// are borrowed from the [`Gcm`] it was started from, so any number of streams may run over one
/// engine at the same time, including from different threads.
///
/// <div class="warning">
///
/// In the [`Direction::Decrypt`] direction, [`GcmStream::update`] returns plaintext before the
/// tag has been checked. That plaintext is unauthenticated: it must be buffered by the caller
/// and discarded unless [`GcmStream::finish_decrypt`] returns `Ok`. Prefer
/// [`Gcm::decrypt_in_place_detached`] when the whole message fits in memory.
///
/// </div>
pub struct GcmStream<'a, C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    direction: Direction,
    ctr: Ctr32<'a, C>,

    /// `E(K, J0)`
    mask: Block,

    mac: Authenticator,
}

impl<'a, C> GcmStream<'a, C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    pub(crate) fn new(
        gcm: &'a Gcm<C>,
        direction: Direction,
        iv: &[u8],
        associated_data: &[u8],
    ) -> Result<Self> {
        if associated_data.len() as u64 > A_MAX {
            return Err(Error::AssociatedDataTooLong);
        }

        let (ctr, mask) = gcm.init_ctr(iv)?;
        let mac = Authenticator::new(&gcm.ghash, associated_data);

        Ok(Self {
            direction,
            ctr,
            mask,
            mac,
        })
    }

    /// Direction this stream was started in.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of plaintext/ciphertext bytes processed so far.
    #[must_use]
    pub fn processed_len(&self) -> u64 {
        self.mac.data_len()
    }

    /// Encrypt or decrypt the next chunk of the message in place.
    ///
    /// Chunks may have any length, including zero; the result does not depend on how the
    /// message is split.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaintextTooLong`] if the message would exceed 2^32 - 2 blocks. In that
    /// case `buffer` is left untouched and the stream is unchanged.
    pub fn update(&mut self, buffer: &mut [u8]) -> Result<()> {
        let total = self.mac.data_len().checked_add(buffer.len() as u64);
        if !matches!(total, Some(len) if len <= P_MAX) {
            return Err(Error::PlaintextTooLong);
        }

        match self.direction {
            Direction::Encrypt => {
                self.ctr.apply_keystream(buffer);
                self.mac.update(buffer);
            }
            Direction::Decrypt => {
                self.mac.update(buffer);
                self.ctr.apply_keystream(buffer);
            }
        }

        Ok(())
    }

    /// Finish an encryption stream, producing its tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongDirection`] if the stream was started with [`Direction::Decrypt`].
    pub fn finish_encrypt(mut self, tag_len: TagLength) -> Result<Tag> {
        if self.direction != Direction::Encrypt {
            return Err(Error::WrongDirection);
        }

        Ok(self.compute_tag(tag_len))
    }

    /// Finish a decryption stream, checking `tag` in constant time.
    ///
    /// The length of `tag` selects the tag length.
    ///
    /// # Errors
    ///
    /// - [`Error::AuthenticationFailed`] if the tag does not match: every byte returned by
    ///   [`GcmStream::update`] must then be discarded.
    /// - [`Error::InvalidTagLength`] if `tag` is not 4 to 16 bytes long.
    /// - [`Error::WrongDirection`] if the stream was started with [`Direction::Encrypt`].
    pub fn finish_decrypt(mut self, tag: &[u8]) -> Result<()> {
        if self.direction != Direction::Decrypt {
            return Err(Error::WrongDirection);
        }

        let tag_len = TagLength::from_bytes(tag.len())?;
        self.compute_tag(tag_len).verify(tag)
    }

    fn compute_tag(&mut self, tag_len: TagLength) -> Tag {
        Tag::new(&self.mac.finalize(), &self.mask, tag_len)
    }
}

impl<C> Debug for GcmStream<'_, C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcmStream")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl<C> Drop for GcmStream<'_, C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    fn drop(&mut self) {
        self.mask.as_mut_slice().zeroize();
    }
}
