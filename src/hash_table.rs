use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use log::debug;
use log::trace;

use crate::chain_table::ChainTable;
use crate::chain_table::Entry;
use crate::config::Config;
use crate::config::DefaultHashBuilder;
use crate::error::Error;
use crate::error::Result;

/// A stored key-value record. Never mutated in place: updating a key writes a
/// new pair into the same chain slot.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pair<K, V> {
    key: K,
    value: V,
}

impl<K, V> Pair<K, V> {
    fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    fn key(&self) -> &K {
        &self.key
    }

    fn value(&self) -> &V {
        &self.value
    }

    fn into_value(self) -> V {
        self.value
    }
}

/// An insertion-ordered hash table using separate chaining.
///
/// `HashTable<K, V, S>` maps keys implementing `Hash + Eq` to values, hashing
/// keys with the builder `S`. A key lives in bucket
/// `hash(key) % capacity()`, in a chain of pairs that share that bucket.
/// Alongside the buckets the table keeps the order in which keys were first
/// inserted, and every ordered view ([`keys`], [`values`], [`pairs`],
/// [`iter`], `Display`) follows it.
///
/// Before every [`set`], including updates of existing keys, the table
/// checks its load factor. At or above the configured threshold the bucket
/// count doubles and every pair is rehashed. Deleting never shrinks the table.
///
/// Keys must uphold the usual contract: if `a == b` then `a` and `b` hash
/// equally. The table does not check it.
///
/// [`keys`]: HashTable::keys
/// [`values`]: HashTable::values
/// [`pairs`]: HashTable::pairs
/// [`iter`]: HashTable::iter
/// [`set`]: HashTable::set
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table = HashTable::from_pairs([("a", 1), ("b", 2)], None).unwrap();
/// assert_eq!(table["a"], 1);
/// assert_eq!(table.keys(), ["a", "b"]);
/// assert_eq!(table.count(), 2);
///
/// table.delete(&"a").unwrap();
/// assert!(!table.contains(&"a"));
/// assert_eq!(table.count(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    table: ChainTable<Pair<K, V>>,
    keys: Vec<K>,
    load_factor_threshold: f64,
    hash_builder: S,
}

impl<K, V> HashTable<K, V, DefaultHashBuilder> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets and
    /// [`DEFAULT_LOAD_FACTOR_THRESHOLD`].
    ///
    /// [`DEFAULT_CAPACITY`]: crate::DEFAULT_CAPACITY
    /// [`DEFAULT_LOAD_FACTOR_THRESHOLD`]: crate::DEFAULT_LOAD_FACTOR_THRESHOLD
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<i32, String> = HashTable::new();
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.load_factor_threshold(), 0.6);
    /// ```
    pub fn new() -> Self {
        Self::from_valid_config(Config::default(), DefaultHashBuilder::default())
    }

    /// Creates an empty table with `capacity` buckets and the default
    /// threshold.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](crate::InvalidArgument) if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(Config::with_capacity(capacity))
    }

    /// Creates an empty table with `capacity` buckets that grows once the load
    /// factor reaches `load_factor_threshold`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](crate::InvalidArgument) if `capacity` is zero or
    /// the threshold is outside `(0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// assert!(HashTable::<u8, u8>::with_capacity_and_threshold(1, 1.0).is_ok());
    /// assert!(HashTable::<u8, u8>::with_capacity_and_threshold(0, 0.5).is_err());
    /// assert!(HashTable::<u8, u8>::with_capacity_and_threshold(1, 0.0).is_err());
    /// assert!(HashTable::<u8, u8>::with_capacity_and_threshold(1, 1.1).is_err());
    /// ```
    pub fn with_capacity_and_threshold(capacity: usize, load_factor_threshold: f64) -> Result<Self> {
        Self::with_config(Config::new(capacity, load_factor_threshold))
    }

    /// Creates an empty table from a validated [`Config`].
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }

    /// Builds a table from `entries`, calling [`set`](HashTable::set) once per
    /// entry in order, so a repeated key keeps its last value.
    ///
    /// When `capacity` is `None` the table gets ten buckets per entry.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](crate::InvalidArgument) if the resulting capacity
    /// is zero, which includes an empty `entries` with no explicit capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let table = HashTable::from_pairs([(1, "one"), (2, "two")], None).unwrap();
    /// assert_eq!(table.capacity(), 20);
    ///
    /// let table = HashTable::from_pairs([(1, "one")], Some(3)).unwrap();
    /// assert_eq!(table.capacity(), 3);
    ///
    /// let empty: Vec<(i32, &str)> = Vec::new();
    /// assert!(HashTable::from_pairs(empty, None).is_err());
    /// ```
    pub fn from_pairs<I>(entries: I, capacity: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Hash + Eq + Clone,
    {
        Self::from_pairs_with_hasher(entries, capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table from `config`, hashing keys with `hash_builder`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument`](crate::InvalidArgument) if the config doesn't
    /// pass [`Config::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::hash::RandomState;
    ///
    /// use chain_hash::Config;
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<i32, i32, _> =
    ///     HashTable::with_config_and_hasher(Config::new(4, 0.5), RandomState::new()).unwrap();
    /// assert_eq!(table.capacity(), 4);
    /// ```
    pub fn with_config_and_hasher(config: Config, hash_builder: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config, hash_builder))
    }

    /// Creates an empty table with the default config, hashing keys with
    /// `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_valid_config(Config::default(), hash_builder)
    }

    fn from_valid_config(config: Config, hash_builder: S) -> Self {
        debug_assert!(config.validate().is_ok());
        Self {
            table: ChainTable::with_buckets(config.capacity),
            keys: Vec::new(),
            load_factor_threshold: config.load_factor_threshold,
            hash_builder,
        }
    }

    /// Returns the number of pairs in the table.
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the table holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.bucket_count()
    }

    /// Returns `count() / capacity()`.
    ///
    /// This can sit above the threshold between a `set` that filled the table
    /// and the next `set`, which grows it first.
    pub fn load_factor(&self) -> f64 {
        self.count() as f64 / self.capacity() as f64
    }

    /// Returns the load factor at which the next `set` doubles the bucket
    /// count.
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every pair. The capacity is kept.
    pub fn clear(&mut self) {
        self.table.clear();
        self.keys.clear();
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Like [`from_pairs`](HashTable::from_pairs), hashing keys with
    /// `hash_builder`.
    pub fn from_pairs_with_hasher<I>(
        entries: I,
        capacity: Option<usize>,
        hash_builder: S,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Clone,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let capacity = capacity.unwrap_or_else(|| entries.len().saturating_mul(10));
        let mut table = Self::with_config_and_hasher(Config::with_capacity(capacity), hash_builder)?;

        trace!(
            "building hash table from {} pairs into {} buckets",
            entries.len(),
            capacity
        );
        for (key, value) in entries {
            table.set(key, value);
        }
        Ok(table)
    }

    #[inline(always)]
    fn hash_key(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }

    fn find_pair<Q>(&self, key: &Q) -> Option<&Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |pair| pair.key().borrow() == key)
    }

    /// Inserts `value` under `key`, replacing the value of an existing key.
    ///
    /// If the load factor is at or above the threshold when this is called,
    /// the bucket count doubles first, even when `key` is already present.
    /// Replacing a value keeps the key's insertion position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::with_capacity_and_threshold(4, 0.5).unwrap();
    /// table.set("a", 1);
    /// table.set("b", 2);
    /// assert_eq!(table.capacity(), 4);
    ///
    /// // 2 / 4 reached the threshold, so this set grows the table first.
    /// table.set("c", 3);
    /// assert_eq!(table.capacity(), 8);
    ///
    /// table.set("a", 10);
    /// assert_eq!(table.keys(), ["a", "b", "c"]);
    /// assert_eq!(table.get(&"a"), Ok(&10));
    /// ```
    pub fn set(&mut self, key: K, value: V)
    where
        K: Clone,
    {
        if self.load_factor() >= self.load_factor_threshold {
            self.resize_and_rehash();
        }

        let hash = self.hash_key(&key);
        match self.table.entry(hash, |pair| pair.key() == &key) {
            Entry::Occupied(mut entry) => {
                entry.replace(Pair::new(key, value));
            }
            Entry::Vacant(entry) => {
                entry.insert(Pair::new(key.clone(), value));
                self.keys.push(key);
            }
        }
    }

    /// Doubles the bucket count and moves every pair, in insertion order, to
    /// its bucket in the new layout. The insertion order itself is untouched.
    fn resize_and_rehash(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2);
        let mut rehashed: ChainTable<Pair<K, V>> = ChainTable::with_buckets(new_capacity);

        for key in &self.keys {
            let hash = self.hash_builder.hash_one(key);
            // Every listed key has exactly one pair in the old buckets.
            let Some(pair) = self.table.remove(hash, |pair| pair.key() == key) else {
                continue;
            };
            match rehashed.entry(hash, |pair| pair.key() == key) {
                Entry::Occupied(mut entry) => {
                    entry.replace(pair);
                }
                Entry::Vacant(entry) => {
                    entry.insert(pair);
                }
            }
        }

        debug_assert!(self.table.is_empty());
        self.table = rehashed;
        debug!(
            "resized hash table from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.count()
        );
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Error;
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set(1, "a");
    /// assert_eq!(table.get(&1), Ok(&"a"));
    /// assert_eq!(table.get(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_pair(key)
            .map(Pair::value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns the value stored under `key`, or `default` if the key is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set("x", 5);
    /// assert_eq!(*table.get_or_default(&"x", &0), 5);
    /// assert_eq!(*table.get_or_default(&"y", &0), 0);
    /// ```
    pub fn get_or_default<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns `true` if the table holds a value for `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_pair(key).is_some()
    }

    /// Removes `key` and returns its value. Pairs sharing its chain keep
    /// their order, and the capacity doesn't change.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent; the table is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Error;
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set("k", 1);
    /// assert_eq!(table.delete(&"k"), Ok(1));
    /// assert!(!table.contains(&"k"));
    /// assert_eq!(table.delete(&"k"), Err(Error::KeyNotFound));
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let pair = self
            .table
            .remove(hash, |pair| pair.key().borrow() == key)
            .ok_or(Error::KeyNotFound)?;

        if let Some(position) = self.keys.iter().position(|k| k.borrow() == key) {
            self.keys.remove(position);
        }
        Ok(pair.into_value())
    }

    /// Returns a copy of the keys in insertion order. Changing the returned
    /// vector doesn't affect the table.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys.clone()
    }

    /// Returns the values in key insertion order.
    ///
    /// Each value is looked up by its key, so this costs one lookup per pair.
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Returns the `(key, value)` pairs in key insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set('b', 2);
    /// table.set('a', 1);
    /// assert_eq!(table.pairs(), [(&'b', &2), (&'a', &1)]);
    /// ```
    pub fn pairs(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Returns a lazy iterator over `(key, value)` in key insertion order.
    ///
    /// Each call starts a fresh walk over the table's current contents. The
    /// iterator borrows the table, so the table can't be changed until the
    /// iterator is dropped; the table provides no other guard against
    /// mutation during iteration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set("one", 1);
    /// table.set("two", 2);
    ///
    /// let total: i32 = table.iter().map(|(_, v)| v).sum();
    /// assert_eq!(total, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            table: self,
            keys: self.keys.iter(),
        }
    }

    /// Rebuilds the table's current pairs into a new, compactly sized table.
    ///
    /// The copy has `10 × count()` buckets (one bucket when empty), the
    /// default load factor threshold, and a clone of this table's hasher. It
    /// does not keep this table's capacity or threshold; use `clone` for an
    /// exact copy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::with_capacity_and_threshold(64, 0.9).unwrap();
    /// table.set("a", 1);
    /// table.set("b", 2);
    ///
    /// let copy = table.copy();
    /// assert_eq!(copy, table);
    /// assert_eq!(copy.capacity(), 20);
    /// assert_eq!(copy.load_factor_threshold(), 0.6);
    ///
    /// let exact = table.clone();
    /// assert_eq!(exact.capacity(), 64);
    /// ```
    pub fn copy(&self) -> Self
    where
        K: Clone,
        V: Clone,
        S: Clone,
    {
        let capacity = self.count().saturating_mul(10).max(1);
        trace!(
            "rebuilding {} pairs into {} buckets",
            self.count(),
            capacity
        );

        let mut copy = Self::from_valid_config(
            Config::with_capacity(capacity),
            self.hash_builder.clone(),
        );
        for (key, value) in self.iter() {
            copy.set(key.clone(), value.clone());
        }
        copy
    }

    /// Returns the number of buckets for each chain length: index `i` counts
    /// buckets holding exactly `i` pairs.
    #[cfg(feature = "stats")]
    pub fn chain_histogram(&self) -> Vec<usize> {
        crate::stats::histogram(self.table.chain_lengths())
    }

    /// Returns chain length statistics for the current bucket layout.
    #[cfg(feature = "stats")]
    pub fn chain_stats(&self) -> crate::stats::ChainStats {
        crate::stats::ChainStats::from_chain_lengths(self.table.chain_lengths())
    }
}

impl<K, V> Default for HashTable<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Two tables are equal when they hold the same set of `(key, value)`
    /// pairs. Capacity, threshold and insertion order are ignored.
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        if self.count() != other.count() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).is_ok_and(|v| v == value))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

/// Renders `{key: value, ...}` in insertion order, using `Debug` for keys and
/// values.
impl<K, V, S> Display for HashTable<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key:?}: {value:?}")?;
        }
        f.write_str("}")
    }
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashTable::from_pairs({self})")
    }
}

impl<K, Q, V, S> Index<&Q> for HashTable<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Returns the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the table.
    fn index(&self, key: &Q) -> &V {
        match self.find_pair(key) {
            Some(pair) => pair.value(),
            None => panic!("key not found in HashTable"),
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, K, V, S>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the pairs of a [`HashTable`] in key insertion order.
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, K, V, S> {
    table: &'a HashTable<K, V, S>,
    keys: core::slice::Iter<'a, K>,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let pair = self.table.find_pair(key)?;
        Some((key, pair.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
}
