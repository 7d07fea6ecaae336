use super::Words;

/// A plain, heap-allocated table of any power-of-two number of words.
///
/// Reads and writes are `O(1)`: a hash is mapped to its word with a shift and
/// a mask, never a division.
impl Words for Vec<u32> {
    fn as_words(&self) -> &[u32] {
        self
    }

    fn as_words_mut(&mut self) -> &mut [u32] {
        self
    }

    fn zip_with<F>(&self, other: &[u32], f: F) -> Self
    where
        F: Fn(u32, u32) -> u32,
    {
        // Invariant: the tables are of equal length, meaning the zipped
        // iters yield both sides to completion.
        assert_eq!(self.len(), other.len());

        self.iter().zip(other).map(|(&a, &b)| f(a, b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const WORDS: usize = 8;
    const MAX_HASH: u32 = (WORDS * super::super::WORD_BITS) as u32;

    proptest! {
        #[test]
        fn prop_set_get(
            values in prop::collection::hash_set(0..MAX_HASH, 0..20),
        ) {
            let mut table: Vec<u32> = vec![0; WORDS];

            for v in &values {
                table.set_bit(*v);
            }

            // Every bit in the table is set only if it was inserted.
            for i in 0..MAX_HASH {
                assert_eq!(table.get_bit(i), values.contains(&i));
            }

            assert_eq!(table.density() as usize, values.len());
        }

        #[test]
        fn prop_set_wraps(v in any::<u32>()) {
            let mut table: Vec<u32> = vec![0; WORDS];
            table.set_bit(v);

            // Only the low 8 bits (3 word bits + 5 bit index) select the bit.
            assert!(table.get_bit(v % MAX_HASH));
            assert_eq!(table.density(), 1);
        }

        #[test]
        fn prop_zip_or(
            a in prop::collection::vec(0..MAX_HASH, 0..20),
            b in prop::collection::vec(0..MAX_HASH, 0..20),
        ) {
            let mut a_table: Vec<u32> = vec![0; WORDS];
            let mut b_table: Vec<u32> = vec![0; WORDS];
            let mut combined: Vec<u32> = vec![0; WORDS];

            for v in a.iter() {
                a_table.set_bit(*v);
                combined.set_bit(*v);
            }

            for v in b.iter() {
                b_table.set_bit(*v);
                combined.set_bit(*v);
            }

            let union = a_table.zip_with(&b_table, |x, y| x | y);

            // Invariant: the union and the combined construction must be equal.
            assert_eq!(union, combined);

            for i in 0..MAX_HASH {
                assert_eq!(union.get_bit(i), a_table.get_bit(i) || b_table.get_bit(i));
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_zip_size_mismatch() {
        let table = vec![0_u32; 4];
        table.zip_with(&[0, 0], |a, b| a | b);
    }

    #[test]
    fn test_xor_fold() {
        let table: Vec<u32> = vec![0b0011, 0b0110, 0b1100, 0];
        assert_eq!(table.xor_fold(), 0b1001);
    }
}
