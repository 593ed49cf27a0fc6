use alloc::vec::Vec;
use core::fmt::Debug;

/// A single chain. Order is insertion order; the first match wins on lookup.
type Bucket<T> = Vec<T>;

/// Raw separate-chaining storage with a fixed number of buckets.
///
/// `ChainTable<T>` stores values of type `T` in `bucket_count()` chains. Like
/// a raw table, it never hashes anything itself: every operation takes the
/// value's precomputed `u64` hash and an equality predicate. A value lives in
/// bucket `hash % bucket_count()`.
///
/// The table never grows on its own. Callers that want a bounded load factor
/// build a larger table and move the values over, which is what
/// [`HashTable`](crate::HashTable) does.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::chain_table::ChainTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
/// }
///
/// let mut table = ChainTable::with_buckets(16);
/// let hash = hash_id(123);
///
/// table.entry(hash, |p: &Person| p.id == 123).or_insert(Person {
///     id: 123,
///     name: "Alice".to_string(),
/// });
///
/// let alice = table.find(hash, |p| p.id == 123).unwrap();
/// assert_eq!(alice.name, "Alice");
/// ```
#[derive(Clone)]
pub struct ChainTable<T> {
    buckets: Vec<Bucket<T>>,
    populated: usize,
}

impl<T: Debug> Debug for ChainTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainTable")
            .field("buckets", &self.buckets)
            .field("populated", &self.populated)
            .finish()
    }
}

impl<T> ChainTable<T> {
    /// Creates a table with exactly `bucket_count` empty chains.
    ///
    /// A request for zero buckets gets one, so indexing is always defined.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::chain_table::ChainTable;
    /// let table: ChainTable<u64> = ChainTable::with_buckets(10);
    /// assert_eq!(table.bucket_count(), 10);
    /// assert!(table.is_empty());
    /// ```
    pub fn with_buckets(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Bucket::new);

        Self {
            buckets,
            populated: 0,
        }
    }

    #[inline(always)]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Returns the number of chains.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of values stored across all chains.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if no chain holds a value.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Removes every value, keeping the bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.populated = 0;
    }

    /// Finds the first value in the chain for `hash` that satisfies `eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::chain_table::ChainTable;
    /// let mut table = ChainTable::with_buckets(4);
    /// table.entry(7, |&n: &u64| n == 70).or_insert(70);
    ///
    /// assert_eq!(table.find(7, |&n| n == 70), Some(&70));
    /// assert_eq!(table.find(7, |&n| n == 71), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|value| eq(value))
    }

    /// Gets the entry for the given hash and equality predicate.
    ///
    /// An occupied entry points at the first matching value in the chain; a
    /// vacant one appends to the end of it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::chain_table::ChainTable;
    /// # use chain_hash::chain_table::Entry;
    /// let mut table = ChainTable::with_buckets(4);
    ///
    /// match table.entry(3, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// match table.entry(3, |s: &String| s == "hello") {
    ///     Entry::Occupied(mut entry) => {
    ///         let old = entry.replace("hello".to_string());
    ///         assert_eq!(old, "hello");
    ///     }
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Entry<'_, T> {
        let bucket = self.bucket_index(hash);
        match self.buckets[bucket].iter().position(|value| eq(value)) {
            Some(slot) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                slot,
            }),
            None => Entry::Vacant(VacantEntry {
                table: self,
                bucket,
            }),
        }
    }

    /// Removes and returns the first value in the chain for `hash` that
    /// satisfies `eq`. The remaining values in the chain keep their order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::chain_table::ChainTable;
    /// let mut table = ChainTable::with_buckets(4);
    /// table.entry(1, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(1, |&n| n == 42), Some(42));
    /// assert_eq!(table.remove(1, |&n| n == 42), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];
        let slot = bucket.iter().position(|value| eq(value))?;
        self.populated -= 1;
        Some(bucket.remove(slot))
    }

    /// Returns an iterator over the values in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.populated,
        }
    }

    /// Returns the length of every chain, in bucket order.
    pub fn chain_lengths(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len)
    }
}

/// A view into a single entry of a [`ChainTable`], which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`ChainTable`].
///
/// [`entry`]: ChainTable::entry
pub enum Entry<'a, T> {
    /// No value in the chain matched.
    Vacant(VacantEntry<'a, T>),
    /// A value in the chain matched.
    Occupied(OccupiedEntry<'a, T>),
}

impl<'a, T> Entry<'a, T> {
    /// Appends `default` if the entry is vacant and returns a mutable
    /// reference to the value in the chain.
    pub fn or_insert(self, default: T) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }
}

/// A view into a chain with no matching value.
pub struct VacantEntry<'a, T> {
    table: &'a mut ChainTable<T>,
    bucket: usize,
}

impl<'a, T> VacantEntry<'a, T> {
    /// Appends `value` to the end of the chain and returns a mutable reference
    /// to it.
    pub fn insert(self, value: T) -> &'a mut T {
        self.table.populated += 1;
        let chain = &mut self.table.buckets[self.bucket];
        let slot = chain.len();
        chain.push(value);
        &mut chain[slot]
    }
}

/// A view into the matching value of a chain.
pub struct OccupiedEntry<'a, T> {
    table: &'a mut ChainTable<T>,
    bucket: usize,
    slot: usize,
}

impl<'a, T> OccupiedEntry<'a, T> {
    /// Gets a reference to the matched value.
    pub fn get(&self) -> &T {
        &self.table.buckets[self.bucket][self.slot]
    }

    /// Converts the entry into a mutable reference to the matched value.
    pub fn into_mut(self) -> &'a mut T {
        &mut self.table.buckets[self.bucket][self.slot]
    }

    /// Puts `value` in the matched value's slot and returns the old value.
    /// The slot's position in the chain doesn't change.
    pub fn replace(&mut self, value: T) -> T {
        core::mem::replace(&mut self.table.buckets[self.bucket][self.slot], value)
    }

    /// Removes the matched value from its chain and returns it.
    pub fn remove(self) -> T {
        self.table.populated -= 1;
        self.table.buckets[self.bucket].remove(self.slot)
    }
}

/// An iterator over the values in a [`ChainTable`].
///
/// This struct is created by the [`iter`] method on [`ChainTable`].
///
/// [`iter`]: ChainTable::iter
pub struct Iter<'a, T> {
    buckets: core::slice::Iter<'a, Bucket<T>>,
    chain: core::slice::Iter<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.chain.next() {
                self.remaining -= 1;
                return Some(value);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
