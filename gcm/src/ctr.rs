//! Counter blocks and the CTR keystream.
//!
//! See NIST SP 800-38D §6.2 (`inc32`), §6.5 (`GCTR`) and §7.1 step 2 (`J0`).

use crate::{Error, IV_MAX, Result};
use cipher::{BlockCipher, BlockEncrypt, BlockSizeUser, consts::U16};
use ghash::{BLOCK_SIZE, Block, GHash, universal_hash::UniversalHash};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Length of an IV which takes the `J0 = IV || 0^31 || 1` fast path.
pub(crate) const FAST_IV_SIZE: usize = 12;

/// Derive the pre-counter block `J0` from an IV.
///
/// `ghash` must be keyed with `H` and have an empty accumulator; it is cloned, never advanced.
pub(crate) fn derive_j0(ghash: &GHash, iv: &[u8]) -> Result<Block> {
    if iv.is_empty() || iv.len() as u64 > IV_MAX {
        return Err(Error::InvalidIvLength);
    }

    if iv.len() == FAST_IV_SIZE {
        let mut j0 = Block::default();
        j0[..FAST_IV_SIZE].copy_from_slice(iv);
        j0[BLOCK_SIZE - 1] = 1;
        return Ok(j0);
    }

    // J0 = GHASH(IV || 0^(s+64) || [len(IV)]_64)
    let mut ghash = ghash.clone();
    ghash.update_padded(iv);

    let mut lengths = Block::default();
    let iv_bits = (iv.len() as u64) * 8;
    lengths[8..].copy_from_slice(&iv_bits.to_be_bytes());
    ghash.update(&[lengths]);

    Ok(ghash.finalize())
}

/// Increment the rightmost 32 bits of a counter block, modulo 2^32.
#[inline]
pub(crate) fn inc32(block: &mut Block) {
    let mut word = [0u8; 4];
    word.copy_from_slice(&block[BLOCK_SIZE - 4..]);
    let word = u32::from_be_bytes(word).wrapping_add(1);
    block[BLOCK_SIZE - 4..].copy_from_slice(&word.to_be_bytes());
}

/// CTR keystream over a borrowed block cipher with a 32-bit big-endian counter.
///
/// The first block produced by [`Ctr32::next_block`] is `E(K, J0)`, which GCM reserves for
/// masking the tag. [`Ctr32::apply_keystream`] then continues from `J0 + 1`. Unused keystream
/// bytes are carried over between calls, so splitting input at arbitrary points does not change
/// the output.
pub(crate) struct Ctr32<'a, C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    cipher: &'a C,

    /// Next counter block to encrypt
    counter: Block,

    /// Current keystream block
    keystream: Block,

    /// Bytes of `keystream` already used; `BLOCK_SIZE` when exhausted
    pos: usize,
}

impl<'a, C> Ctr32<'a, C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    pub(crate) fn new(cipher: &'a C, j0: &Block) -> Self {
        Self {
            cipher,
            counter: *j0,
            keystream: Block::default(),
            pos: BLOCK_SIZE,
        }
    }

    /// Encrypt the current counter block and advance the counter.
    #[inline]
    pub(crate) fn next_block(&mut self) -> Block {
        let mut block = self.counter;
        self.cipher.encrypt_block(&mut block);
        inc32(&mut self.counter);
        block
    }

    /// XOR `buf` with the keystream.
    pub(crate) fn apply_keystream(&mut self, buf: &mut [u8]) {
        // leftover keystream from a previous partial block
        let n = (BLOCK_SIZE - self.pos).min(buf.len());
        let (head, rest) = buf.split_at_mut(n);
        xor_in_place(head, &self.keystream[self.pos..self.pos + n]);
        self.pos += n;

        let mut chunks = rest.chunks_exact_mut(BLOCK_SIZE);
        for chunk in &mut chunks {
            let keystream = self.next_block();
            xor_in_place(chunk, &keystream);
        }

        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            self.keystream = self.next_block();
            xor_in_place(tail, &self.keystream[..tail.len()]);
            self.pos = tail.len();
        }
    }
}

#[cfg(feature = "zeroize")]
impl<C> Drop for Ctr32<'_, C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    fn drop(&mut self) {
        self.counter.as_mut_slice().zeroize();
        self.keystream.as_mut_slice().zeroize();
    }
}

#[inline]
fn xor_in_place(buf: &mut [u8], keystream: &[u8]) {
    debug_assert_eq!(buf.len(), keystream.len());
    for (a, b) in buf.iter_mut().zip(keystream) {
        *a ^= b;
    }
}
