use core::borrow::Borrow;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`HashSet`] when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by [`HashSet`] when none is specified.
        pub type DefaultHashBuilder = std::hash::RandomState;
    }
}

cfg_if::cfg_if! {
    if #[cfg(any(feature = "foldhash", feature = "std"))] {
        /// A hash set implemented using the chained [`HashTable`] as the
        /// underlying storage.
        ///
        /// `HashSet<T, S>` stores values of type `T` where `T` implements
        /// `Hash + Eq` and uses a configurable hasher builder `S` to hash
        /// values. Each value acts as its own key.
        ///
        /// Unlike `std::collections::HashSet`, inserting a value that is
        /// already present stores a second copy; [`len`](Self::len) counts
        /// every copy.
        #[derive(Clone)]
        pub struct HashSet<T, S = DefaultHashBuilder> {
            table: HashTable<T>,
            hash_builder: S,
        }
    } else {
        /// A hash set implemented using the chained [`HashTable`] as the
        /// underlying storage.
        ///
        /// Without the `std` or `foldhash` features there is no default
        /// hasher builder, so `S` must always be named.
        #[derive(Clone)]
        pub struct HashSet<T, S> {
            table: HashTable<T>,
            hash_builder: S,
        }
    }
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.values()).finish()
    }
}

/// Renders the bucket-by-bucket dump of the underlying [`HashTable`].
impl<T, S> Display for HashSet<T, S>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.table, f)
    }
}

impl<T, S> HashSet<T, S> {
    /// Returns the number of stored values, counting duplicates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// set.insert(1);
    /// assert_eq!(set.len(), 2);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets holding at least one value.
    pub fn usage(&self) -> usize {
        self.table.usage()
    }

    /// Returns the number of buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity(0);
    /// assert_eq!(set.capacity(), 4);
    /// # }
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns `usage / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns chain-length and utilization statistics.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }

    /// Computes a histogram of chain lengths. See
    /// [`HashTable::chain_histogram`].
    #[cfg(feature = "stats")]
    pub fn chain_histogram(&self) -> alloc::vec::Vec<usize> {
        self.table.chain_histogram()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash set with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::hash_set::HashSet;
    ///
    /// let set: HashSet<i32, _> = HashSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash set with `capacity` buckets and the given hasher
    /// builder. A capacity of zero selects the default of four buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::hash_set::HashSet;
    ///
    /// let set: HashSet<i32, _> = HashSet::with_capacity_and_hasher(100, RandomState::new());
    /// assert_eq!(set.capacity(), 100);
    /// # }
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Adds a value to the set.
    ///
    /// Equal values are not merged: each call stores a new entry. If the
    /// load factor had reached the threshold, the set first doubles its
    /// bucket count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<&str> = HashSet::new();
    /// set.insert("apple");
    /// assert!(set.contains("apple"));
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) {
        let hash = self.hash_builder.hash_one(&value);
        self.table.insert(hash, value);
    }

    /// Returns `true` if the set contains a value equal to `value`.
    ///
    /// The value may be any borrowed form of the set's value type, but `Hash`
    /// and `Eq` on the borrowed form must match those for the value type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<String> = HashSet::new();
    /// set.insert(String::from("pear"));
    /// assert!(set.contains("pear"));
    /// assert!(!set.contains("plum"));
    /// # }
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(value);
        self.table.contains(hash, |v| v.borrow() == value)
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash set with four buckets using the default hasher
    /// builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 4);
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash set with `capacity` buckets using the default
    /// hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
