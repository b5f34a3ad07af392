//! `NoOpHashState` passes an already well-distributed `u64` through
//! unchanged. [`TypeId`](core::any::TypeId) hashes are such values.

use core::hash::{BuildHasher, Hasher};

/// A hasher that keeps the last written `u64` as the hash.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Folding the bytes little-endian keeps `write_u32(n)` equal to
        // `write_u64(n)`.
        self.hash = bytes
            .iter()
            .rev()
            .fold(0, |hash, &byte| (hash << 8) | u64::from(byte));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s.
///
/// Only suitable for keys that write a single pre-mixed integer.
///
/// ```
/// use core::hash::{BuildHasher, Hasher};
/// use morph_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// hasher.write_u64(7);
/// assert_eq!(hasher.finish(), 7);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher::default()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hasher};

    use super::NoOpHashState;

    #[test]
    fn narrow_writes_match_wide_writes() {
        let mut narrow = NoOpHashState.build_hasher();
        narrow.write_u32(1234);
        let mut wide = NoOpHashState.build_hasher();
        wide.write_u64(1234);
        assert_eq!(narrow.finish(), wide.finish());
    }
}
