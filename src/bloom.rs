use crate::error::{check_size, Error, Result};
use crate::words::{Words, WORD_BITS};
use crate::{Capacity, Filter, HashFunctions};
use std::fmt;

/// A bloom filter backed by a heap-allocated table of a power-of-two number of
/// 32-bit words.
pub type ArrayFilter<T> = Bloom<T, Vec<u32>>;

/// A bloom filter holding exactly one 32-bit word inline.
///
/// Behaves identically to an [`ArrayFilter`] of one word, without the
/// allocation.
pub type SingleWordFilter<T> = Bloom<T, u32>;

/// Construct a [`Filter`] with varying parameters.
///
/// ```rust
/// use bloomfold::FilterBuilder;
///
/// let mut filter = FilterBuilder::default()
///                     .hash_fn(|v: &u64| *v as u32)
///                     .hash_fn(|v: &u64| (*v >> 17) as u32)
///                     .words(16)
///                     .build()
///                     .unwrap();
///
/// filter.insert(&42);
/// assert!(filter.contains(&42));
/// ```
pub struct FilterBuilder<T: ?Sized> {
    hashes: HashFunctions<T>,
    capacity: Capacity,
}

/// Initialise a `FilterBuilder` that, unless changed, will construct a filter
/// of 8 words (256 bits) with no hash functions.
impl<T: ?Sized> Default for FilterBuilder<T> {
    fn default() -> Self {
        Self {
            hashes: HashFunctions::new(),
            capacity: Capacity::Words(8),
        }
    }
}

impl<T: ?Sized> FilterBuilder<T> {
    /// Use the shared set of hash functions `hashes`, replacing any configured
    /// so far.
    pub fn hash_functions(self, hashes: HashFunctions<T>) -> Self {
        Self { hashes, ..self }
    }

    /// Append `f` to the configured hash functions.
    pub fn hash_fn<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> u32 + Send + Sync + 'static,
    {
        Self {
            hashes: self.hashes.with(f),
            ..self
        }
    }

    /// Set the size of the filter.
    ///
    /// See [`Capacity`].
    pub fn capacity(self, capacity: impl Into<Capacity>) -> Self {
        Self {
            capacity: capacity.into(),
            ..self
        }
    }

    /// Size the filter as `words` zeroed 32-bit words.
    pub fn words(self, words: usize) -> Self {
        self.capacity(Capacity::Words(words))
    }

    /// Initialise the filter from an existing word table.
    pub fn table(self, table: Vec<u32>) -> Self {
        self.capacity(Capacity::Table(table))
    }

    /// Initialise the [`Filter`] with the provided parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if the configured word count is not a
    /// power of two.
    pub fn build(self) -> Result<Filter<T>> {
        Filter::with_capacity(self.hashes, self.capacity)
    }
}

/// A bloom filter over a power-of-two number of 32-bit words, generic over its
/// word storage `W`.
///
/// Use the [`ArrayFilter`] and [`SingleWordFilter`] aliases, or [`Filter`]
/// which selects between them at construction.
///
/// Each hash function maps an item to a `u32`: bits 5 and up select the word
/// (wrapped with a mask of the word count minus one) and the low 5 bits select
/// the bit within it. Because every size is a power of two, a larger filter
/// can be [folded](Bloom::reduce_to) onto the index space of any smaller one.
pub struct Bloom<T: ?Sized, W> {
    hashes: HashFunctions<T>,
    words: W,
}

impl<T: ?Sized> Bloom<T, Vec<u32>> {
    /// Construct an empty filter of `words` 32-bit words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if `words` is not a power of two.
    pub fn new(hashes: HashFunctions<T>, words: usize) -> Result<Self> {
        let words = check_size(words)?;
        tracing::debug!(words, hash_functions = hashes.len(), "new array bloom filter");
        Ok(Self::from_parts(hashes, vec![0; words]))
    }

    /// Construct a filter using `table` as its words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if the length of `table` is not a power
    /// of two.
    pub fn from_table(hashes: HashFunctions<T>, table: Vec<u32>) -> Result<Self> {
        check_size(table.len())?;
        Ok(Self::from_parts(hashes, table))
    }

    /// Consume the filter, returning its word table.
    pub fn into_table(self) -> Vec<u32> {
        self.words
    }
}

impl<T: ?Sized> Bloom<T, u32> {
    /// Construct an empty single word filter.
    pub fn new(hashes: HashFunctions<T>) -> Self {
        Self::from_word(hashes, 0)
    }

    /// Construct a single word filter with `word` as its contents.
    pub fn from_word(hashes: HashFunctions<T>, word: u32) -> Self {
        Self::from_parts(hashes, word)
    }

    /// The filter contents.
    pub fn word(&self) -> u32 {
        self.words
    }
}

impl<T: ?Sized, W: Words> Bloom<T, W> {
    pub(crate) fn from_parts(hashes: HashFunctions<T>, words: W) -> Self {
        Self { hashes, words }
    }

    /// Insert every item in `items` into the filter.
    ///
    /// Returns the filter to allow chaining:
    ///
    /// ```rust
    /// use bloomfold::{ArrayFilter, HashFunctions};
    ///
    /// let hashes = HashFunctions::new().with(|v: &u32| *v);
    /// let mut filter = ArrayFilter::new(hashes, 4).unwrap();
    ///
    /// assert!(filter.add(&[1, 2]).add(&[3]).contains(&3));
    /// ```
    pub fn add<'a, I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for item in items {
            self.insert(item);
        }
        self
    }

    /// Insert `item` into the filter.
    ///
    /// Any subsequent calls to [`contains`](Bloom::contains) for the same
    /// `item` will always return true.
    pub fn insert(&mut self, item: &T) -> &mut Self {
        for hash in self.hashes.hashes(item) {
            self.words.set_bit(hash);
        }
        self
    }

    /// Checks if `item` exists in the filter.
    ///
    /// If `contains` returns true, `item` has **probably** been inserted
    /// previously. If `contains` returns false, `item` has **definitely not**
    /// been inserted into the filter.
    ///
    /// A filter with no hash functions contains everything.
    pub fn contains(&self, item: &T) -> bool {
        let words = &self.words;
        self.hashes.hashes(item).all(|hash| words.get_bit(hash))
    }

    /// Return a new filter containing the items of both `self` and `other`.
    ///
    /// The result uses the hash functions of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is not the same size as `self`. Filters of different
    /// sizes must first be folded with [`reduce_to`](Bloom::reduce_to), or
    /// combined with [`try_union`](Bloom::try_union).
    pub fn union<V: Words>(&self, other: &Bloom<T, V>) -> Self {
        self.combine(other.words(), |a, b| a | b)
    }

    /// Return a new filter containing only the bits set in both `self` and
    /// `other`.
    ///
    /// The result uses the hash functions of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is not the same size as `self`.
    pub fn intersect<V: Words>(&self, other: &Bloom<T, V>) -> Self {
        self.combine(other.words(), |a, b| a & b)
    }

    /// Return `true` if every bit set in `self` is also set in `other`.
    ///
    /// This fails fast on the first word of `self` not covered by `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is not the same size as `self`.
    pub fn subset<V: Words>(&self, other: &Bloom<T, V>) -> bool {
        self.subset_words(other.words())
    }

    /// Like [`union`](Bloom::union), returning [`Error::SizeMismatch`]
    /// instead of panicking when the sizes differ.
    pub fn try_union<V: Words>(&self, other: &Bloom<T, V>) -> Result<Self> {
        check_aligned(self.len(), other.len())?;
        Ok(self.union(other))
    }

    /// Like [`intersect`](Bloom::intersect), returning
    /// [`Error::SizeMismatch`] instead of panicking when the sizes differ.
    pub fn try_intersect<V: Words>(&self, other: &Bloom<T, V>) -> Result<Self> {
        check_aligned(self.len(), other.len())?;
        Ok(self.intersect(other))
    }

    /// Like [`subset`](Bloom::subset), returning [`Error::SizeMismatch`]
    /// instead of panicking when the sizes differ.
    pub fn try_subset<V: Words>(&self, other: &Bloom<T, V>) -> Result<bool> {
        check_aligned(self.len(), other.len())?;
        Ok(self.subset(other))
    }

    /// Fold this filter down to `words` words.
    ///
    /// Word `i` of `self` is ORed into word `i & (words - 1)` of the result,
    /// so the result has every bit set that the same items would have set in
    /// a filter built at `words` words, and possibly more. This makes the
    /// set operations meaningful between filters built at different sizes:
    ///
    /// ```rust
    /// use bloomfold::{ArrayFilter, HashFunctions};
    ///
    /// let hashes = HashFunctions::new().with(|v: &u32| *v);
    ///
    /// let mut large = ArrayFilter::new(hashes.clone(), 8).unwrap();
    /// large.add(&[1, 300]);
    ///
    /// let mut small = ArrayFilter::new(hashes, 4).unwrap();
    /// small.add(&[1, 300, 42]);
    ///
    /// assert!(large.reduce_to(4).unwrap().subset(&small.into()));
    /// ```
    ///
    /// Folding to the current size produces an identical filter. Folding to
    /// one word produces a [`SingleWordFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if `words` is not a power of two, and
    /// [`Error::FoldExpansion`] if `words` is larger than the filter.
    pub fn reduce_to(&self, words: usize) -> Result<Filter<T>> {
        let words = check_size(words)?;
        if words > self.len() {
            tracing::debug!(from = self.len(), to = words, "refusing to fold bloom filter upwards");
            return Err(Error::FoldExpansion {
                from: self.len(),
                to: words,
            });
        }

        tracing::debug!(from = self.len(), to = words, "folding bloom filter");
        Filter::from_table(self.hashes.clone(), self.words.fold_to(words))
    }

    /// A cheap structural fingerprint of the filter: all words XORed together.
    pub fn hash(&self) -> u32 {
        self.words.xor_fold()
    }

    /// The number of set bits in the filter.
    pub fn density(&self) -> u32 {
        self.words.density()
    }

    /// Estimate the probability of a false positive from the current load
    /// factor: `(density / capacity) ^ k` for `k` hash functions.
    pub fn estimated_fpp(&self) -> f64 {
        let load = f64::from(self.density()) / self.capacity() as f64;
        load.powi(self.hashes.len() as i32)
    }

    /// The words of the filter.
    pub fn words(&self) -> &[u32] {
        self.words.as_words()
    }

    /// The number of 32-bit words in the filter.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// The number of bits in the filter.
    pub fn capacity(&self) -> usize {
        self.len() * WORD_BITS
    }

    /// Return `true` if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words().iter().all(|&w| w == 0)
    }

    /// The hash functions this filter was built with.
    pub fn hash_functions(&self) -> &HashFunctions<T> {
        &self.hashes
    }

    pub(crate) fn subset_words(&self, other: &[u32]) -> bool {
        self.words.is_subset(other)
    }

    pub(crate) fn combine<F>(&self, other: &[u32], f: F) -> Self
    where
        F: Fn(u32, u32) -> u32,
    {
        Self::from_parts(self.hashes.clone(), self.words.zip_with(other, f))
    }
}

pub(crate) fn check_aligned(left: usize, right: usize) -> Result<()> {
    if left == right {
        return Ok(());
    }

    tracing::debug!(left, right, "bloom filter sizes differ");
    Err(Error::SizeMismatch { left, right })
}

impl<'a, T, W> Extend<&'a T> for Bloom<T, W>
where
    T: ?Sized + 'a,
    W: Words,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<T: ?Sized, W: Clone> Clone for Bloom<T, W> {
    fn clone(&self) -> Self {
        Self {
            hashes: self.hashes.clone(),
            words: self.words.clone(),
        }
    }
}

impl<T: ?Sized, W: Words> fmt::Debug for Bloom<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bloom")
            .field("hashes", &self.hashes)
            .field("words", &self.words())
            .finish()
    }
}

/// Filters are equal when their words are equal; hash functions are not
/// compared.
impl<T: ?Sized, W: Words, V: Words> PartialEq<Bloom<T, V>> for Bloom<T, W> {
    fn eq(&self, other: &Bloom<T, V>) -> bool {
        self.words() == other.words()
    }
}

impl<T: ?Sized, W: Words> Eq for Bloom<T, W> {}
