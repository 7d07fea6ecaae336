use crate::words::WORD_BITS;

/// Capacity bounds the allocated size and false-positive rate of a
/// [`Filter`](crate::Filter).
///
/// A filter is sized in 32-bit words, and the word count must always be a
/// power of two. A capacity is either a bare word count, producing an empty
/// filter, or an existing word table whose length is the word count.
///
/// The false positive probability for a bloom filter increases as the number
/// of entries increases. For `m` bits, `k` hash functions and `n` entries it
/// is approximately:
///
/// ```text
///     p = (1 - e^(-kn/m))^k
/// ```
///
/// With `k = 3` hash functions, the number of entries at which a filter
/// reaches a 1% and a 50% false positive probability is:
///
/// ```text
///     words       bits      p = 0.01      p = 0.5
///     -----   --------   -----------   ----------
///         1         32             2           16
///         8        256            20          134
///        64      2,048           165        1,077
///     1,024     32,768         2,650       17,240
///    16,384    524,288        42,403      275,850
/// ```
///
/// Filters of different capacities can still be compared: see
/// [`reduce_to`](crate::Filter::reduce_to).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capacity {
    /// A zero-filled table of this many 32-bit words.
    Words(usize),

    /// An existing table of 32-bit words, used as-is.
    Table(Vec<u32>),
}

impl Capacity {
    /// The number of 32-bit words this capacity describes.
    pub fn words(&self) -> usize {
        match self {
            Capacity::Words(n) => *n,
            Capacity::Table(t) => t.len(),
        }
    }

    /// The number of bits this capacity describes.
    pub fn bits(&self) -> usize {
        self.words() * WORD_BITS
    }
}

impl From<usize> for Capacity {
    fn from(words: usize) -> Self {
        Capacity::Words(words)
    }
}

impl From<Vec<u32>> for Capacity {
    fn from(table: Vec<u32>) -> Self {
        Capacity::Table(table)
    }
}

impl From<&[u32]> for Capacity {
    fn from(table: &[u32]) -> Self {
        Capacity::Table(table.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_bits() {
        let c = Capacity::from(8_usize);
        assert_eq!(c.words(), 8);
        assert_eq!(c.bits(), 256);

        let c = Capacity::from(vec![0_u32, 1, 2, 3]);
        assert_eq!(c.words(), 4);
        assert_eq!(c.bits(), 128);

        let c = Capacity::from(&[42_u32][..]);
        assert_eq!(c, Capacity::Table(vec![42]));
        assert_eq!(c.bits(), 32);
    }
}
