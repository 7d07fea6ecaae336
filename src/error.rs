//! Error types returned by filter construction and the checked set operations.

use std::fmt;

/// The error type returned by fallible `bloomfold` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The requested number of 32-bit words is not a power of two.
    ///
    /// Zero words is never valid.
    InvalidSize {
        /// The rejected word count.
        words: usize,
    },

    /// Two filters passed to a word-aligned operation (union, intersect,
    /// subset) have different word counts.
    ///
    /// Use [`reduce_to`](crate::Filter::reduce_to) on the larger filter first.
    SizeMismatch {
        /// Word count of the receiver.
        left: usize,
        /// Word count of the argument.
        right: usize,
    },

    /// A fold was asked to produce a filter larger than its source.
    FoldExpansion {
        /// Word count of the source filter.
        from: usize,
        /// The requested (larger) word count.
        to: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize { words } => {
                write!(f, "bloom filter size {} is not a power of two", words)
            }
            Error::SizeMismatch { left, right } => write!(
                f,
                "bloom filter sizes differ ({} words vs {} words)",
                left, right
            ),
            Error::FoldExpansion { from, to } => write!(
                f,
                "cannot fold a {} word bloom filter up to {} words",
                from, to
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A specialised `Result` for `bloomfold` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns `Ok(words)` if `words` is a usable filter size.
pub(crate) fn check_size(words: usize) -> Result<usize> {
    if words.is_power_of_two() {
        return Ok(words);
    }

    tracing::debug!(words, "rejecting non power-of-two bloom filter size");
    Err(Error::InvalidSize { words })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_size() {
        for words in [1, 2, 4, 8, 16, 32, 1 << 20] {
            assert_eq!(check_size(words), Ok(words));
        }

        for words in [0, 3, 5, 6, 7, 12, 100] {
            assert_eq!(check_size(words), Err(Error::InvalidSize { words }));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidSize { words: 3 }.to_string(),
            "bloom filter size 3 is not a power of two"
        );
        assert_eq!(
            Error::SizeMismatch { left: 8, right: 4 }.to_string(),
            "bloom filter sizes differ (8 words vs 4 words)"
        );
        assert_eq!(
            Error::FoldExpansion { from: 2, to: 4 }.to_string(),
            "cannot fold a 2 word bloom filter up to 4 words"
        );
    }
}
