//! SHAKE256 extendable-output function (FIPS 202).
//!
//! ```
//! use ecparams::shake::{Shake256, shake_256};
//!
//! let mut hasher = Shake256::new();
//! hasher.update(b"mess");
//! hasher.update(b"age");
//!
//! let mut out = [0u8; 32];
//! hasher.finalize_xof().read(&mut out);
//! assert_eq!(out.to_vec(), shake_256(b"message", 32));
//! ```

use core::fmt;

use tracing::trace;

use crate::keccak::keccak_f;

/// Rate in bytes: 1600 bits of state minus a 512-bit capacity.
const RATE: usize = 136;

/// Domain separation bits `1111` followed by the first bit of `pad10*1`.
const DOMAIN_SUFFIX: u8 = 0x1f;

/// Compute `output_len` bytes of SHAKE256 over `message`.
pub fn shake_256(message: &[u8], output_len: usize) -> Vec<u8> {
    trace!(input_len = message.len(), output_len, "shake256");

    let mut hasher = Shake256::new();
    hasher.update(message);

    let mut out = vec![0u8; output_len];
    hasher.finalize_xof().read(&mut out);
    out
}

/// Incremental SHAKE256 hasher.
#[derive(Clone)]
pub struct Shake256 {
    state: [u64; 25],
    buffer: [u8; RATE],
    pos: usize,
}

impl Shake256 {
    /// Create a hasher with an empty state.
    pub fn new() -> Self {
        Self {
            state: [0; 25],
            buffer: [0; RATE],
            pos: 0,
        }
    }

    /// Absorb more input.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let n = (RATE - self.pos).min(data.len());
            self.buffer[self.pos..self.pos + n].copy_from_slice(&data[..n]);
            self.pos += n;
            data = &data[n..];

            if self.pos == RATE {
                absorb_block(&mut self.state, &self.buffer);
                self.pos = 0;
            }
        }
    }

    /// Pad the remaining input and switch to squeezing.
    pub fn finalize_xof(mut self) -> Shake256Reader {
        self.buffer[self.pos..].fill(0);
        self.buffer[self.pos] ^= DOMAIN_SUFFIX;
        self.buffer[RATE - 1] ^= 0x80;
        absorb_block(&mut self.state, &self.buffer);

        let mut reader = Shake256Reader {
            state: self.state,
            buffer: [0; RATE],
            pos: 0,
        };
        reader.fill_buffer();
        reader
    }
}

impl Default for Shake256 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Shake256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Shake256 { ... }")
    }
}

/// Squeezing half of a finalized [`Shake256`].
///
/// Successive reads continue the same output stream, so reading 16 bytes
/// twice yields the same 32 bytes as a single 32-byte read.
#[derive(Clone)]
pub struct Shake256Reader {
    state: [u64; 25],
    buffer: [u8; RATE],
    pos: usize,
}

impl Shake256Reader {
    /// Fill `out` with the next bytes of output.
    pub fn read(&mut self, mut out: &mut [u8]) {
        while !out.is_empty() {
            if self.pos == RATE {
                keccak_f(&mut self.state);
                self.fill_buffer();
            }

            let n = (RATE - self.pos).min(out.len());
            out[..n].copy_from_slice(&self.buffer[self.pos..self.pos + n]);
            self.pos += n;
            out = &mut out[n..];
        }
    }

    fn fill_buffer(&mut self) {
        for (chunk, lane) in self.buffer.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        self.pos = 0;
    }
}

impl fmt::Debug for Shake256Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Shake256Reader { ... }")
    }
}

/// XOR one rate-sized block into the state and permute.
fn absorb_block(state: &mut [u64; 25], block: &[u8; RATE]) {
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *lane ^= u64::from_le_bytes(bytes);
    }
    keccak_f(state);
}
