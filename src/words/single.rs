use super::{bitmask_for_hash, popcount, Words};

/// A single word stored inline, with no allocation.
///
/// Behaves exactly as a one-word table: the word index of every hash is 0, so
/// only the bit index is computed.
impl Words for u32 {
    fn as_words(&self) -> &[u32] {
        std::slice::from_ref(self)
    }

    fn as_words_mut(&mut self) -> &mut [u32] {
        std::slice::from_mut(self)
    }

    fn zip_with<F>(&self, other: &[u32], f: F) -> Self
    where
        F: Fn(u32, u32) -> u32,
    {
        assert_eq!(other.len(), 1);
        f(*self, other[0])
    }

    fn len(&self) -> usize {
        1
    }

    fn set_bit(&mut self, hash: u32) {
        *self |= bitmask_for_hash(hash);
    }

    fn get_bit(&self, hash: u32) -> bool {
        *self & bitmask_for_hash(hash) != 0
    }

    fn xor_fold(&self) -> u32 {
        *self
    }

    fn density(&self) -> u32 {
        popcount(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn prop_matches_one_word_table(hashes: Vec<u32>, probe: u32) -> bool {
        let mut word = 0_u32;
        let mut table = vec![0_u32; 1];

        for &h in &hashes {
            word.set_bit(h);
            table.set_bit(h);
        }

        word == table[0]
            && word.get_bit(probe) == table.get_bit(probe)
            && word.density() == table.density()
            && word.xor_fold() == table.xor_fold()
    }

    #[test]
    fn test_set_get() {
        let mut word = 0_u32;
        word.set_bit(3);
        word.set_bit(32 + 4);

        assert_eq!(word, 0b11000);
        assert!(word.get_bit(3));
        assert!(word.get_bit(4));
        assert!(word.get_bit(64 + 3));
        assert!(!word.get_bit(5));
    }

    #[test]
    fn test_fold_to_self() {
        assert_eq!(42_u32.fold_to(1), vec![42]);
    }

    #[test]
    #[should_panic]
    fn test_zip_size_mismatch() {
        0_u32.zip_with(&[1, 2], |a, b| a | b);
    }
}
