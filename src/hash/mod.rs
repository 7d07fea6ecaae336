//! Hash functions mapping items to the 32-bit values that address filter bits.
//!
//! A filter never owns its hash functions: it holds a [`HashFunctions`] set
//! that is shared, unchanged, with every filter derived from it.

pub mod jenkins;

use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::Arc;

/// A function mapping an item to an unsigned 32-bit hash.
///
/// Implemented for every `Fn(&T) -> u32`, so plain closures can be used:
///
/// ```rust
/// use bloomfold::HashFunction;
///
/// let h = |v: &u32| v.wrapping_mul(0x9e37_79b9);
/// assert_eq!(h.hash(&1), 0x9e37_79b9);
/// ```
pub trait HashFunction<T: ?Sized> {
    /// Hash `item`.
    fn hash(&self, item: &T) -> u32;
}

impl<T, F> HashFunction<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> u32,
{
    fn hash(&self, item: &T) -> u32 {
        self(item)
    }
}

/// Adapts a [`BuildHasher`] into a [`HashFunction`] for any [`Hash`] type.
///
/// The 64-bit output of the hasher is truncated to its low 32 bits.
#[derive(Debug, Clone, Default)]
pub struct BuildHasherFn<S>(pub S);

impl<T, S> HashFunction<T> for BuildHasherFn<S>
where
    T: Hash + ?Sized,
    S: BuildHasher,
{
    fn hash(&self, item: &T) -> u32 {
        let mut hasher = self.0.build_hasher();
        Hash::hash(item, &mut hasher);
        hasher.finish() as u32
    }
}

type SharedHashFunction<T> = Arc<dyn HashFunction<T> + Send + Sync>;

/// An ordered, immutable set of hash functions shared between filters.
///
/// Cloning a `HashFunctions` is cheap and yields a handle to the same set; it
/// never copies the functions themselves. Extending a set with
/// [`with`](HashFunctions::with) produces a new set and leaves every existing
/// handle (and the filters holding it) untouched.
///
/// ```rust
/// use bloomfold::HashFunctions;
///
/// let hashes = HashFunctions::new()
///     .with(|v: &u64| *v as u32)
///     .with(|v: &u64| (*v >> 32) as u32);
///
/// let values: Vec<u32> = hashes.hashes(&0x0000_0002_0000_0001).collect();
/// assert_eq!(values, vec![1, 2]);
/// ```
pub struct HashFunctions<T: ?Sized> {
    fns: Arc<[SharedHashFunction<T>]>,
}

impl<T: ?Sized> HashFunctions<T> {
    /// An empty set of hash functions.
    pub fn new() -> Self {
        Self {
            fns: Arc::from(Vec::new()),
        }
    }

    /// Return a new set containing the functions of `self` followed by `f`.
    pub fn with<F>(&self, f: F) -> Self
    where
        F: Fn(&T) -> u32 + Send + Sync + 'static,
    {
        self.with_hash_function(f)
    }

    /// Return a new set containing the functions of `self` followed by `h`.
    pub fn with_hash_function<H>(&self, h: H) -> Self
    where
        H: HashFunction<T> + Send + Sync + 'static,
    {
        let fns: Vec<SharedHashFunction<T>> = self
            .fns
            .iter()
            .cloned()
            .chain(std::iter::once(Arc::new(h) as SharedHashFunction<T>))
            .collect();

        Self { fns: fns.into() }
    }

    /// Hash `item` with each function in order.
    pub fn hashes<'a>(&'a self, item: &'a T) -> impl Iterator<Item = u32> + 'a {
        self.fns.iter().map(move |h| h.hash(item))
    }

    /// The number of hash functions in the set.
    pub fn len(&self) -> usize {
        self.fns.len()
    }

    /// Return `true` if the set holds no hash functions.
    pub fn is_empty(&self) -> bool {
        self.fns.is_empty()
    }

    /// Return `true` if `self` and `other` are handles to the same set.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fns, &other.fns)
    }
}

impl<T: Hash + ?Sized> HashFunctions<T> {
    /// Construct a set with one [`BuildHasherFn`] per hasher, in order.
    ///
    /// Each hasher should be seeded differently; identical hashers set
    /// identical bits and add nothing to the filter.
    pub fn from_build_hashers<I, S>(hashers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: BuildHasher + Send + Sync + 'static,
    {
        let fns: Vec<SharedHashFunction<T>> = hashers
            .into_iter()
            .map(|s| Arc::new(BuildHasherFn(s)) as SharedHashFunction<T>)
            .collect();

        Self { fns: fns.into() }
    }
}

impl<T: ?Sized> Clone for HashFunctions<T> {
    fn clone(&self) -> Self {
        Self {
            fns: Arc::clone(&self.fns),
        }
    }
}

impl<T: ?Sized> Default for HashFunctions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for HashFunctions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashFunctions")
            .field("len", &self.len())
            .finish()
    }
}
