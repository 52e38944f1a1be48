#![cfg(test)]

use std::hash::{BuildHasher, Hash, Hasher};

/// A key with a hash chosen by the test, compared only by its payload. Two keys with the same
/// hash and different payloads always share a bucket chain.
#[derive(Debug, Clone)]
pub struct ManualHash<T> {
    hash: u64,
    value: T,
}

impl<T> ManualHash<T> {
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash {
            hash,
            value,
        }
    }

    pub fn value(self) -> T {
        self.value
    }
}

impl<T> Hash for ManualHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: PartialEq> PartialEq for ManualHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for ManualHash<T> {}

/// XORs every written word into its state, so a single integer hashes to itself.
#[derive(Debug, Default)]
pub struct BadHasher(u64);

impl Hasher for BadHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.0 ^= u64::from_le_bytes(word);
        }
    }

    fn write_u64(&mut self, i: u64) {
        self.0 ^= i;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BadHasherBuilder;

impl BuildHasher for BadHasherBuilder {
    type Hasher = BadHasher;

    fn build_hasher(&self) -> BadHasher {
        BadHasher::default()
    }
}
