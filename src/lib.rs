//! bloomfold implements variable-size bloom filters whose sizes are always a
//! power of two 32-bit words.
//!
//! Restricting sizes to powers of two means a hash is wrapped into range with
//! a single bitmask rather than a modulus, and that any two filter sizes
//! differ by an integer multiple. A larger filter can therefore be folded onto
//! the index space of a smaller one by ORing its blocks together, after which
//! the two can be compared directly. For an 8 word filter `f8` and a 16 word
//! filter `f16`, `f8` is a subset of `f16` when:
//!
//! ```text
//!     (f8[0] & (f16[0] | f16[8])) == f8[0] && (f8[1] & (f16[1] | f16[9])) == f8[1] && ...
//! ```
//!
//! which is exactly `f8.subset(&f16.reduce_to(8)?)`:
//!
//! ```rust
//! use bloomfold::{Filter, jenkins};
//!
//! let hashes = jenkins::jenkins_string([1, 2, 3]);
//!
//! let mut constants = Filter::new(hashes.clone(), 8)?;
//! constants.add(["pi", "e"]);
//!
//! let mut tree = Filter::new(hashes, 16)?;
//! tree.add(["pi", "e", "tau"]);
//!
//! assert!(constants.subset(&tree.reduce_to(8)?));
//! # Ok::<(), bloomfold::Error>(())
//! ```
//!
//! A [`Filter`] of one word is stored inline as a [`SingleWordFilter`]; every
//! other size uses an [`ArrayFilter`]. Filters never own their hash functions:
//! a [`HashFunctions`] set is shared between a filter and every filter derived
//! from it by [`union`](Filter::union), [`intersect`](Filter::intersect) and
//! [`reduce_to`](Filter::reduce_to).
//!
//! Bloom filters are not resistant to adversarial input, and filters are not
//! synchronised: share them between threads behind a lock, or treat them as
//! immutable once populated.

mod bloom;
mod capacity;
mod error;
mod filter;
mod hash;
mod words;

pub use bloom::{ArrayFilter, Bloom, FilterBuilder, SingleWordFilter};
pub use capacity::Capacity;
pub use error::{Error, Result};
pub use filter::Filter;
pub use hash::{jenkins, BuildHasherFn, HashFunction, HashFunctions};
pub use words::{popcount, Words, WORD_BITS};
