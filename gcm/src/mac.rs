//! GHASH over `A || 0^u || C || 0^v || [len(A)]_64 || [len(C)]_64`.

use ghash::{BLOCK_SIZE, Block, GHash, universal_hash::UniversalHash};

/// Incremental GHASH of associated data followed by ciphertext.
///
/// Associated data is absorbed in full when the authenticator is created. Ciphertext may then be
/// fed in pieces of any size: partial blocks are buffered and only folded once complete, and the
/// final partial block is zero-padded by [`Authenticator::finalize`].
#[derive(Clone)]
pub(crate) struct Authenticator {
    ghash: GHash,

    /// Ciphertext bytes not yet folded into `ghash`
    buffer: Block,
    buffer_pos: usize,

    /// Associated data length in bytes
    aad_len: u64,

    /// Ciphertext length in bytes
    data_len: u64,
}

impl Authenticator {
    /// `ghash` must be keyed with `H` and have an empty accumulator; it is cloned.
    pub(crate) fn new(ghash: &GHash, associated_data: &[u8]) -> Self {
        let mut ghash = ghash.clone();
        ghash.update_padded(associated_data);

        Self {
            ghash,
            buffer: Block::default(),
            buffer_pos: 0,
            aad_len: associated_data.len() as u64,
            data_len: 0,
        }
    }

    /// Ciphertext bytes absorbed so far.
    pub(crate) fn data_len(&self) -> u64 {
        self.data_len
    }

    #[cfg(test)]
    pub(crate) fn set_data_len(&mut self, len: u64) {
        self.data_len = len;
    }

    /// Absorb ciphertext.
    pub(crate) fn update(&mut self, mut data: &[u8]) {
        self.data_len += data.len() as u64;

        if self.buffer_pos > 0 {
            let n = (BLOCK_SIZE - self.buffer_pos).min(data.len());
            let (head, tail) = data.split_at(n);
            self.buffer[self.buffer_pos..self.buffer_pos + n].copy_from_slice(head);
            self.buffer_pos += n;
            data = tail;

            if self.buffer_pos < BLOCK_SIZE {
                return;
            }

            self.ghash.update(&[self.buffer]);
            self.buffer_pos = 0;
        }

        let mut chunks = data.chunks_exact(BLOCK_SIZE);
        for chunk in &mut chunks {
            self.ghash.update(&[Block::clone_from_slice(chunk)]);
        }

        let tail = chunks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffer_pos = tail.len();
    }

    /// Fold the padded tail and the length block, returning `S`.
    ///
    /// The authenticator is reset to an empty accumulator and must not be reused for the same
    /// message afterwards.
    pub(crate) fn finalize(&mut self) -> Block {
        if self.buffer_pos > 0 {
            self.ghash.update_padded(&self.buffer[..self.buffer_pos]);
            self.buffer_pos = 0;
        }

        let mut lengths = Block::default();
        lengths[..8].copy_from_slice(&(self.aad_len * 8).to_be_bytes());
        lengths[8..].copy_from_slice(&(self.data_len * 8).to_be_bytes());
        self.ghash.update(&[lengths]);

        self.ghash.finalize_reset()
    }
}
