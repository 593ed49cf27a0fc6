use alloc::vec::Vec;

/// Chain length statistics for a [`HashTable`](crate::HashTable).
///
/// Returned by [`HashTable::chain_stats`](crate::HashTable::chain_stats).
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStats {
    /// Number of pairs stored in the table
    pub entries: usize,
    /// Number of buckets (the table's capacity)
    pub buckets: usize,
    /// Number of buckets holding no pairs
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Load factor (entries / buckets)
    pub load_factor: f64,
    /// Mean chain length over non-empty buckets
    pub mean_chain_length: f64,
}

impl ChainStats {
    pub(crate) fn from_chain_lengths(lengths: impl Iterator<Item = usize>) -> Self {
        let mut stats = ChainStats {
            entries: 0,
            buckets: 0,
            empty_buckets: 0,
            longest_chain: 0,
            load_factor: 0.0,
            mean_chain_length: 0.0,
        };

        for len in lengths {
            stats.buckets += 1;
            stats.entries += len;
            stats.longest_chain = stats.longest_chain.max(len);
            if len == 0 {
                stats.empty_buckets += 1;
            }
        }

        if stats.buckets > 0 {
            stats.load_factor = stats.entries as f64 / stats.buckets as f64;
        }
        let occupied = stats.buckets - stats.empty_buckets;
        if occupied > 0 {
            stats.mean_chain_length = stats.entries as f64 / occupied as f64;
        }

        stats
    }

    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Chain Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.entries,
            self.buckets,
            self.load_factor * 100.0
        );
        println!(
            "Empty buckets: {} ({:.2}%)",
            self.empty_buckets,
            if self.buckets == 0 {
                0.0
            } else {
                self.empty_buckets as f64 / self.buckets as f64 * 100.0
            }
        );
        println!("Longest chain: {}", self.longest_chain);
        println!("Mean chain length: {:.2}", self.mean_chain_length);
    }
}

/// Counts buckets by chain length: index `i` holds the number of buckets
/// whose chain has exactly `i` pairs.
pub(crate) fn histogram(lengths: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut hist = Vec::new();
    for len in lengths {
        if hist.len() <= len {
            hist.resize(len + 1, 0);
        }
        hist[len] += 1;
    }
    hist
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn stats_from_lengths() {
        let stats = ChainStats::from_chain_lengths([0, 3, 1, 0].into_iter());
        assert_eq!(stats.entries, 4);
        assert_eq!(stats.buckets, 4);
        assert_eq!(stats.empty_buckets, 2);
        assert_eq!(stats.longest_chain, 3);
        assert_eq!(stats.load_factor, 1.0);
        assert_eq!(stats.mean_chain_length, 2.0);
    }

    #[test]
    fn stats_of_empty_buckets() {
        let stats = ChainStats::from_chain_lengths([0, 0].into_iter());
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.load_factor, 0.0);
        assert_eq!(stats.mean_chain_length, 0.0);
    }

    #[test]
    fn histogram_counts_buckets() {
        assert_eq!(histogram([0, 3, 1, 0, 1].into_iter()), vec![2, 2, 0, 1]);
        assert_eq!(histogram(core::iter::empty()), Vec::<usize>::new());
    }
}
