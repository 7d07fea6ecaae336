//! Word storage strategies for the backing bit-vector of a [`Bloom`](crate::Bloom).

mod array;
mod single;

/// The width, in bits, of a single storage word.
pub const WORD_BITS: usize = 32;

/// A trait to abstract the word storage of a [`Bloom`](crate::Bloom) filter.
///
/// Implementations always hold a power-of-two number of 32-bit words, which
/// lets a hash be wrapped into range with a bitmask instead of a modulus.
pub trait Words {
    /// Borrow the stored words.
    fn as_words(&self) -> &[u32];

    /// Mutably borrow the stored words.
    fn as_words_mut(&mut self) -> &mut [u32];

    /// Construct a new instance of the same representation whose word at
    /// index `i` is `f(self[i], other[i])`.
    ///
    /// # Panics
    ///
    /// Panics if `other` does not hold the same number of words as `self`.
    fn zip_with<F>(&self, other: &[u32], f: F) -> Self
    where
        Self: Sized,
        F: Fn(u32, u32) -> u32;

    /// The number of 32-bit words held.
    fn len(&self) -> usize {
        self.as_words().len()
    }

    /// The mask applied to a word index to wrap it into range.
    fn mask(&self) -> usize {
        self.len() - 1
    }

    /// Set the bit addressed by `hash`.
    fn set_bit(&mut self, hash: u32) {
        let index = index_for_hash(hash, self.mask());
        self.as_words_mut()[index] |= bitmask_for_hash(hash);
    }

    /// Return `true` if the bit addressed by `hash` is set.
    fn get_bit(&self, hash: u32) -> bool {
        self.as_words()[index_for_hash(hash, self.mask())] & bitmask_for_hash(hash) != 0
    }

    /// XOR all words together.
    fn xor_fold(&self) -> u32 {
        self.as_words().iter().fold(0, |acc, w| acc ^ w)
    }

    /// The number of set bits across all words.
    fn density(&self) -> u32 {
        self.as_words().iter().map(|&w| popcount(w)).sum()
    }

    /// Return `true` if every set bit in `self` is also set in `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` does not hold the same number of words as `self`.
    fn is_subset(&self, other: &[u32]) -> bool {
        let words = self.as_words();
        assert_eq!(words.len(), other.len());

        words.iter().zip(other).all(|(&a, &b)| a & b == a)
    }

    /// OR the words of `self` down into `words` words.
    ///
    /// Source word `i` lands in destination word `i & (words - 1)`, so each
    /// destination word is the union of the `len() / words` source words that
    /// share its low index bits. `words` must be a power of two no larger
    /// than `len()`.
    fn fold_to(&self, words: usize) -> Vec<u32> {
        debug_assert!(words.is_power_of_two());
        debug_assert!(words <= self.len());

        let mask = words - 1;
        let mut folded = vec![0; words];
        for (i, &w) in self.as_words().iter().enumerate() {
            folded[i & mask] |= w;
        }
        folded
    }
}

/// The index of the word holding the bit addressed by `hash`, wrapped by
/// `mask` (the word count minus one).
#[inline(always)]
pub(crate) fn index_for_hash(hash: u32, mask: usize) -> usize {
    (hash >> 5) as usize & mask
}

/// The bit within its word addressed by `hash`.
#[inline(always)]
pub(crate) fn bitmask_for_hash(hash: u32) -> u32 {
    1 << (hash & 31)
}

/// Count the set bits in `x` by summing adjacent bit fields in parallel.
///
/// Numerically identical to [`u32::count_ones`].
#[inline]
pub fn popcount(x: u32) -> u32 {
    let x = x - ((x >> 1) & 0x5555_5555);
    let x = (x & 0x3333_3333) + ((x >> 2) & 0x3333_3333);
    let x = (x + (x >> 4)) & 0x0f0f_0f0f;
    x.wrapping_mul(0x0101_0101) >> 24
}
