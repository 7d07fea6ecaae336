use crate::bloom::{ArrayFilter, SingleWordFilter};
use crate::error::Result;
use crate::{Capacity, HashFunctions};
use std::fmt;

/// A variable-size bloom filter.
///
/// A `Filter` is either a [`SingleWordFilter`], chosen when the filter is
/// exactly one word, or an [`ArrayFilter`] for every other power-of-two size.
/// The representation is fixed at construction and both expose the same
/// operations, so callers never need to know which is in use.
///
/// ```rust
/// use bloomfold::{Filter, HashFunctions};
///
/// let hashes = HashFunctions::new()
///     .with(|s: &str| bloomfold::jenkins::one_at_a_time(1, s))
///     .with(|s: &str| bloomfold::jenkins::one_at_a_time(2, s));
///
/// let mut a = Filter::new(hashes.clone(), 16).unwrap();
/// a.add(["x", "y"]);
///
/// let mut b = Filter::new(hashes, 4).unwrap();
/// b.add(["x", "y", "z"]);
///
/// // Fold the larger filter onto the smaller one before comparing.
/// assert!(a.reduce_to(b.len()).unwrap().subset(&b));
/// ```
pub enum Filter<T: ?Sized> {
    /// A one word filter stored inline.
    SingleWord(SingleWordFilter<T>),

    /// A filter of any other power-of-two number of words.
    Array(ArrayFilter<T>),
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            Filter::SingleWord($f) => $body,
            Filter::Array($f) => $body,
        }
    };
}

impl<T: ?Sized> Filter<T> {
    /// Construct an empty filter of `words` 32-bit words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`](crate::Error::InvalidSize) if `words`
    /// is not a power of two.
    pub fn new(hashes: HashFunctions<T>, words: usize) -> Result<Self> {
        Self::with_capacity(hashes, Capacity::Words(words))
    }

    /// Construct a filter using `table` as its words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`](crate::Error::InvalidSize) if the length
    /// of `table` is not a power of two.
    pub fn from_table(hashes: HashFunctions<T>, table: Vec<u32>) -> Result<Self> {
        Self::with_capacity(hashes, Capacity::Table(table))
    }

    /// Construct a filter of the given [`Capacity`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`](crate::Error::InvalidSize) if the word
    /// count is not a power of two.
    pub fn with_capacity(hashes: HashFunctions<T>, capacity: impl Into<Capacity>) -> Result<Self> {
        let filter = match capacity.into() {
            Capacity::Words(1) => Filter::SingleWord(SingleWordFilter::new(hashes)),
            Capacity::Table(t) if t.len() == 1 => {
                Filter::SingleWord(SingleWordFilter::from_word(hashes, t[0]))
            }
            Capacity::Words(n) => Filter::Array(ArrayFilter::new(hashes, n)?),
            Capacity::Table(t) => Filter::Array(ArrayFilter::from_table(hashes, t)?),
        };

        Ok(filter)
    }

    /// Return `true` if this filter uses the inline single word
    /// representation.
    pub fn is_single_word(&self) -> bool {
        matches!(self, Filter::SingleWord(_))
    }

    /// Insert every item in `items` into the filter, returning the filter.
    pub fn add<'a, I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        dispatch!(self, f => {
            f.add(items);
        });
        self
    }

    /// Insert `item` into the filter, returning the filter.
    pub fn insert(&mut self, item: &T) -> &mut Self {
        dispatch!(self, f => {
            f.insert(item);
        });
        self
    }

    /// Checks if `item` exists in the filter.
    ///
    /// False positives are possible, false negatives are not.
    pub fn contains(&self, item: &T) -> bool {
        dispatch!(self, f => f.contains(item))
    }

    /// Return a new filter with the bits of both `self` and `other`, using the
    /// hash functions and representation of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is not the same size as `self`. See
    /// [`reduce_to`](Filter::reduce_to) and [`try_union`](Filter::try_union).
    pub fn union(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a | b)
    }

    /// Return a new filter with the bits set in both `self` and `other`,
    /// using the hash functions and representation of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is not the same size as `self`.
    pub fn intersect(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a & b)
    }

    /// Return `true` if every bit set in `self` is also set in `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is not the same size as `self`.
    pub fn subset(&self, other: &Self) -> bool {
        dispatch!(self, f => f.subset_words(other.words()))
    }

    /// Like [`union`](Filter::union), returning
    /// [`Error::SizeMismatch`](crate::Error::SizeMismatch) instead of
    /// panicking when the sizes differ.
    pub fn try_union(&self, other: &Self) -> Result<Self> {
        crate::bloom::check_aligned(self.len(), other.len())?;
        Ok(self.union(other))
    }

    /// Like [`intersect`](Filter::intersect), returning
    /// [`Error::SizeMismatch`](crate::Error::SizeMismatch) instead of
    /// panicking when the sizes differ.
    pub fn try_intersect(&self, other: &Self) -> Result<Self> {
        crate::bloom::check_aligned(self.len(), other.len())?;
        Ok(self.intersect(other))
    }

    /// Like [`subset`](Filter::subset), returning
    /// [`Error::SizeMismatch`](crate::Error::SizeMismatch) instead of
    /// panicking when the sizes differ.
    pub fn try_subset(&self, other: &Self) -> Result<bool> {
        crate::bloom::check_aligned(self.len(), other.len())?;
        Ok(self.subset(other))
    }

    /// Fold this filter down to `words` words.
    ///
    /// See [`Bloom::reduce_to`](crate::Bloom::reduce_to).
    pub fn reduce_to(&self, words: usize) -> Result<Self> {
        dispatch!(self, f => f.reduce_to(words))
    }

    /// All words XORed together.
    pub fn hash(&self) -> u32 {
        dispatch!(self, f => f.hash())
    }

    /// The number of set bits in the filter.
    pub fn density(&self) -> u32 {
        dispatch!(self, f => f.density())
    }

    /// Estimate the probability of a false positive from the current load
    /// factor.
    pub fn estimated_fpp(&self) -> f64 {
        dispatch!(self, f => f.estimated_fpp())
    }

    /// The words of the filter.
    pub fn words(&self) -> &[u32] {
        dispatch!(self, f => f.words())
    }

    /// The number of 32-bit words in the filter.
    pub fn len(&self) -> usize {
        dispatch!(self, f => f.len())
    }

    /// The number of bits in the filter.
    pub fn capacity(&self) -> usize {
        dispatch!(self, f => f.capacity())
    }

    /// Return `true` if no bits are set.
    pub fn is_empty(&self) -> bool {
        dispatch!(self, f => f.is_empty())
    }

    /// The hash functions this filter was built with.
    pub fn hash_functions(&self) -> &HashFunctions<T> {
        dispatch!(self, f => f.hash_functions())
    }

    fn combine<F>(&self, other: &Self, op: F) -> Self
    where
        F: Fn(u32, u32) -> u32,
    {
        match self {
            Filter::SingleWord(f) => Filter::SingleWord(f.combine(other.words(), op)),
            Filter::Array(f) => Filter::Array(f.combine(other.words(), op)),
        }
    }
}

impl<'a, T: ?Sized + 'a> Extend<&'a T> for Filter<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<T: ?Sized> From<ArrayFilter<T>> for Filter<T> {
    fn from(f: ArrayFilter<T>) -> Self {
        Filter::Array(f)
    }
}

impl<T: ?Sized> From<SingleWordFilter<T>> for Filter<T> {
    fn from(f: SingleWordFilter<T>) -> Self {
        Filter::SingleWord(f)
    }
}

impl<T: ?Sized> Clone for Filter<T> {
    fn clone(&self) -> Self {
        match self {
            Filter::SingleWord(f) => Filter::SingleWord(f.clone()),
            Filter::Array(f) => Filter::Array(f.clone()),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::SingleWord(b) => f.debug_tuple("SingleWord").field(b).finish(),
            Filter::Array(b) => f.debug_tuple("Array").field(b).finish(),
        }
    }
}

/// Filters are equal when their words are equal, regardless of
/// representation.
impl<T: ?Sized> PartialEq for Filter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.words() == other.words()
    }
}

impl<T: ?Sized> Eq for Filter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use quickcheck_macros::quickcheck;

    fn test_hashes() -> HashFunctions<u32> {
        HashFunctions::new()
            .with(|v: &u32| v.wrapping_mul(0x9e37_79b9))
            .with(|v: &u32| v.rotate_left(7) ^ 0x5bd1_e995)
    }

    #[test]
    fn test_dispatch_on_size() {
        let f = Filter::new(test_hashes(), 1).unwrap();
        assert!(f.is_single_word());
        assert_eq!(f.len(), 1);

        let f = Filter::from_table(test_hashes(), vec![42]).unwrap();
        assert!(f.is_single_word());
        assert_eq!(f.words(), &[42]);

        for words in [2, 4, 8, 16, 32] {
            let f = Filter::new(test_hashes(), words).unwrap();
            assert!(!f.is_single_word());
            assert_eq!(f.len(), words);
        }

        let f = Filter::from_table(test_hashes(), vec![1, 2]).unwrap();
        assert!(!f.is_single_word());
        assert_eq!(f.words(), &[1, 2]);
    }

    #[test]
    fn test_invalid_size() {
        for words in [0, 3, 5, 6] {
            assert_eq!(
                Filter::new(test_hashes(), words).unwrap_err(),
                Error::InvalidSize { words }
            );
        }

        assert_eq!(
            Filter::from_table(test_hashes(), vec![0; 3]).unwrap_err(),
            Error::InvalidSize { words: 3 }
        );
        assert_eq!(
            Filter::from_table(test_hashes(), vec![]).unwrap_err(),
            Error::InvalidSize { words: 0 }
        );
    }

    #[test]
    fn test_with_capacity() {
        let f = Filter::with_capacity(test_hashes(), vec![1_u32, 2, 3, 4]).unwrap();
        assert_eq!(f.words(), &[1, 2, 3, 4]);

        let f = Filter::with_capacity(test_hashes(), 8_usize).unwrap();
        assert_eq!(f.capacity(), 256);
    }

    #[test]
    fn test_result_keeps_representation_of_self() {
        let single = Filter::new(test_hashes(), 1).unwrap();
        let array: Filter<u32> = ArrayFilter::from_table(test_hashes(), vec![0b0100])
            .unwrap()
            .into();

        assert!(single.union(&array).is_single_word());
        assert!(!array.union(&single).is_single_word());
        assert!(single.intersect(&array).is_single_word());
        assert_eq!(single.union(&array).words(), &[0b0100]);
        assert_eq!(single, Filter::from(SingleWordFilter::new(test_hashes())));
    }

    #[test]
    fn test_checked_operations() {
        let a = Filter::new(test_hashes(), 8).unwrap();
        let b = Filter::new(test_hashes(), 4).unwrap();

        let want = Error::SizeMismatch { left: 8, right: 4 };
        assert_eq!(a.try_union(&b).unwrap_err(), want);
        assert_eq!(a.try_intersect(&b).unwrap_err(), want);
        assert_eq!(a.try_subset(&b).unwrap_err(), want);

        let folded = a.reduce_to(4).unwrap();
        assert!(folded.try_subset(&b).unwrap());
        assert_eq!(folded.try_union(&b).unwrap(), b);
    }

    #[test]
    #[should_panic]
    fn test_subset_size_mismatch_panics() {
        let a = Filter::new(test_hashes(), 8).unwrap();
        let b = Filter::new(test_hashes(), 4).unwrap();
        a.subset(&b);
    }

    #[test]
    fn test_string_items() {
        let hashes = crate::jenkins::jenkins_string([11, 22, 33]);
        let mut f = Filter::new(hashes, 2).unwrap();

        f.add(vec!["cat", "fox"]).insert("banana");
        assert!(f.contains("cat"));
        assert!(f.contains("fox"));
        assert!(f.contains("banana"));
        assert!(f.density() <= 9);
    }

    #[quickcheck]
    fn prop_single_word_equivalence(vals: Vec<u32>, probe: u32) -> bool {
        let mut single = Filter::new(test_hashes(), 1).unwrap();
        let mut array: Filter<u32> = ArrayFilter::new(test_hashes(), 1).unwrap().into();
        assert!(single.is_single_word());
        assert!(!array.is_single_word());

        single.add(&vals);
        array.add(&vals);

        single.contains(&probe) == array.contains(&probe)
            && single.hash() == array.hash()
            && single.density() == array.density()
            && single == array
    }

    #[quickcheck]
    fn prop_no_false_negatives(vals: Vec<u32>, words_log2: u8) {
        let words = 1 << (words_log2 % 8);
        let mut f = Filter::new(test_hashes(), words).unwrap();
        f.extend(&vals);

        for v in &vals {
            assert!(f.contains(v));
        }
    }
}
