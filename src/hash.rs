//! Default hashing policy.
//!
//! The byte-hash algorithm zoo (SeaHash, FNV-1a, SDBM, CRC32, MD5) and the
//! type-specific hash specializations are out of scope for this core --
//! callers plug in their own [`BuildHasher`] exactly as they would for
//! [`std::collections::HashMap`]. This module only supplies one reasonable
//! default so the engines are usable without forcing a choice on callers,
//! generalizing the teacher's `StHasher`/`StBuildHasher` (which hashed a
//! single `st_data_t` word at a time via a caller-supplied function
//! pointer) into a `core::hash::Hash`-driven multiply-rotate hasher.

use core::hash::{BuildHasher, Hash, Hasher};
use core::mem::size_of;

#[cfg(target_pointer_width = "64")]
const SEED_ROTATE: u64 = 0x517c_c1b7_2722_0a95;
#[cfg(target_pointer_width = "32")]
const SEED_ROTATE: u64 = 0x9e37_79b9;

/// A small multiply-rotate hasher in the same family as the teacher's
/// `StHasher`: each word of input rotates the running state left by 5 bits,
/// xors in the word, then multiplies by a fixed odd constant.
pub struct FxHasher {
    state: u64,
}

impl Default for FxHasher {
    #[inline]
    fn default() -> Self {
        Self { state: 0 }
    }
}

impl FxHasher {
    #[inline]
    fn add_to_hash(&mut self, word: u64) {
        self.state = self.state.rotate_left(5) ^ word;
        self.state = self.state.wrapping_mul(SEED_ROTATE);
    }
}

impl Hasher for FxHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut chunks = bytes.chunks_exact(size_of::<u64>());
        for chunk in &mut chunks {
            let mut buf = [0_u8; 8];
            buf.copy_from_slice(chunk);
            self.add_to_hash(u64::from_ne_bytes(buf));
        }
        let rem = chunks.remainder();
        if !rem.is_empty() {
            let mut buf = [0_u8; 8];
            buf[..rem.len()].copy_from_slice(rem);
            self.add_to_hash(u64::from_ne_bytes(buf));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.add_to_hash(i as u64);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.add_to_hash(i as u64);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.add_to_hash(i as u64);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.add_to_hash(i);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.add_to_hash(i as u64);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

/// Builds seeded [`FxHasher`] instances.
///
/// Mirrors the teacher's `StBuildHasher`, which seeds each fresh `StHasher`
/// from `getrandom` so that hash-flooding a process-long-lived table isn't
/// trivial; the seed becomes the hasher's initial state rather than being
/// mixed in up front, matching the source's `rotate_left(5) ^ i` chain.
#[derive(Clone, Copy)]
pub struct FxBuildHasher {
    seed: u64,
}

impl FxBuildHasher {
    /// Builds a hasher family seeded from the OS random source.
    ///
    /// Falls back to a fixed seed if the platform's random source is
    /// unavailable, mirroring the teacher's `let _ = getrandom::getrandom(..)`
    /// best-effort handling.
    #[must_use]
    pub fn new() -> Self {
        let mut buf = [0_u8; 8];
        let _ = getrandom::getrandom(&mut buf);
        Self {
            seed: u64::from_ne_bytes(buf),
        }
    }
}

impl Default for FxBuildHasher {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for FxBuildHasher {
    type Hasher = FxHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        FxHasher { state: self.seed }
    }
}

/// Hashes `key` with the given `BuildHasher`, the one entry point every
/// engine routes key hashing through.
#[inline]
#[must_use]
pub fn hash_one<S: BuildHasher, Q: Hash + ?Sized>(build_hasher: &S, key: &Q) -> u64 {
    let mut hasher = build_hasher.build_hasher();
    key.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_fixed_seed() {
        let bh = FxBuildHasher { seed: 0x1234 };
        assert_eq!(hash_one(&bh, &"hello"), hash_one(&bh, &"hello"));
        assert_ne!(hash_one(&bh, &"hello"), hash_one(&bh, &"world"));
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = FxBuildHasher { seed: 1 };
        let b = FxBuildHasher { seed: 2 };
        assert_ne!(hash_one(&a, &42_u64), hash_one(&b, &42_u64));
    }
}
