//! Bob Jenkins' one-at-a-time string hash.
//!
//! Strings are hashed over their UTF-16 code units so that non-ASCII input
//! produces the same values as other UTF-16 based implementations of the
//! keyed variant.

use super::HashFunctions;

/// Hash `s` with the one-at-a-time function, starting from `key`.
///
/// ```rust
/// use bloomfold::jenkins::one_at_a_time;
///
/// assert_eq!(one_at_a_time(0, "a"), 0xca2e_9442);
/// ```
pub fn one_at_a_time(key: u32, s: &str) -> u32 {
    let mut h = key;
    for c in s.encode_utf16() {
        h = h.wrapping_add(u32::from(c));
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }

    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h.wrapping_add(h << 15)
}

/// A string hash function keyed by `key`.
///
/// Different keys produce independent functions suitable for use together in
/// one filter.
pub fn jenkins_string_hash(key: u32) -> impl Fn(&str) -> u32 + Clone + Send + Sync + 'static {
    move |s: &str| one_at_a_time(key, s)
}

/// A set of string hash functions, one [`jenkins_string_hash`] per key.
///
/// ```rust
/// use bloomfold::{jenkins, Filter};
///
/// let mut filter = Filter::new(jenkins::jenkins_string([1, 2, 3]), 4).unwrap();
/// filter.insert("bananas");
/// assert!(filter.contains("bananas"));
/// ```
pub fn jenkins_string<I>(keys: I) -> HashFunctions<str>
where
    I: IntoIterator<Item = u32>,
{
    keys.into_iter()
        .fold(HashFunctions::new(), |hashes, key| {
            hashes.with(jenkins_string_hash(key))
        })
}
