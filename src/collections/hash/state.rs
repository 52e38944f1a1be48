use std::hash::{BuildHasher, Hasher};

/// A deterministic [`BuildHasher`] producing [`SimpleHasher`]s.
///
/// Every write folds into the running hash as `h = 5h + x`, so a lone integer hashes to its own
/// value and a byte string to the classic `h = 5h + byte`. This is cheap and reproducible across
/// runs, but offers no protection against adversarial keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleState;

impl BuildHasher for SimpleState {
    type Hasher = SimpleHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SimpleHasher::default()
    }
}

/// The [`Hasher`] built by [`SimpleState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleHasher {
    hash: u64,
}

impl SimpleHasher {
    fn fold(&mut self, value: u64) {
        self.hash = self.hash.wrapping_mul(5).wrapping_add(value);
    }
}

impl Hasher for SimpleHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.fold(*byte as u64);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.fold(i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.fold(i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.fold(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.fold(i as u64);
    }

    fn write_i16(&mut self, i: i16) {
        self.fold(i as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.fold(i as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.fold(i as u64);
    }

    fn write_isize(&mut self, i: isize) {
        self.fold(i as u64);
    }
}
