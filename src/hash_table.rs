//! The raw chained hash table.
//!
//! [`HashTable`] works on caller-supplied `u64` hashes and equality
//! predicates. It owns the bucket array, tracks how many buckets are in use,
//! and doubles the bucket array when the load factor reaches
//! [`LOAD_FACTOR_THRESHOLD`].

use alloc::boxed::Box;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;

use crate::chain;
use crate::chain::Chain;
use crate::chain::IntoChain;
use crate::chain::Link;

/// Bucket count used when no capacity, or a capacity of zero, is requested.
pub const DEFAULT_CAPACITY: usize = 4;

cfg_if::cfg_if! {
    if #[cfg(feature = "load-factor-fifty")] {
        const THRESHOLD_NUMERATOR: u128 = 1;
        const THRESHOLD_DENOMINATOR: u128 = 2;
        /// Load factor (used buckets / total buckets) at which the next
        /// insertion rebuilds the table.
        pub const LOAD_FACTOR_THRESHOLD: f64 = 0.5;
    } else if #[cfg(feature = "load-factor-ninety")] {
        const THRESHOLD_NUMERATOR: u128 = 9;
        const THRESHOLD_DENOMINATOR: u128 = 10;
        /// Load factor (used buckets / total buckets) at which the next
        /// insertion rebuilds the table.
        pub const LOAD_FACTOR_THRESHOLD: f64 = 0.9;
    } else {
        const THRESHOLD_NUMERATOR: u128 = 3;
        const THRESHOLD_DENOMINATOR: u128 = 4;
        /// Load factor (used buckets / total buckets) at which the next
        /// insertion rebuilds the table.
        pub const LOAD_FACTOR_THRESHOLD: f64 = 0.75;
    }
}

/// Exact `usage / capacity >= LOAD_FACTOR_THRESHOLD` without going through
/// floating point.
#[inline(always)]
fn at_threshold(usage: usize, capacity: usize) -> bool {
    usage as u128 * THRESHOLD_DENOMINATOR >= capacity as u128 * THRESHOLD_NUMERATOR
}

#[inline(always)]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

fn empty_buckets<V>(capacity: usize) -> Box<[Link<V>]> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

/// Chain-length statistics for hash table analysis.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of non-empty buckets
    pub usage: usize,
    /// Total number of buckets
    pub capacity: usize,
    /// Number of stored entries, duplicates included
    pub total_entries: usize,
    /// Load factor (usage / capacity)
    pub load_factor: f64,
    /// Number of buckets with no chain
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Average chain length over non-empty buckets
    pub mean_chain_length: f64,
}

#[cfg(feature = "stats")]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Chained Table Debug Statistics ===");
        println!(
            "Bucket Usage: {}/{} ({:.2}% load factor)",
            self.usage,
            self.capacity,
            self.load_factor * 100.0
        );
        println!("Entries: {}", self.total_entries);
        println!("Empty Buckets: {}", self.empty_buckets);
        println!(
            "Chains: longest {}, mean {:.02}",
            self.longest_chain, self.mean_chain_length
        );
    }
}

/// A hash table of singly linked chains.
///
/// `HashTable<V>` stores values of type `V` in a bucket array. A value lives
/// in the chain of bucket `hash % capacity`, where `hash` is the hash supplied
/// when the value was inserted. Colliding values are prepended to the chain,
/// so the most recently inserted value is always the chain head.
///
/// The table never deduplicates: inserting an equal value twice stores two
/// entries, and [`len`](Self::len) counts both.
///
/// ## Growth
///
/// Before each insertion the table compares `usage / capacity` against
/// [`LOAD_FACTOR_THRESHOLD`], where `usage` is the number of non-empty
/// buckets. At or above the threshold it rebuilds into twice as many buckets
/// and then places the new value. The check only happens at the start of an
/// insertion, so the table may sit above the threshold until the next one.
///
/// ## Example
///
/// ```rust
/// # use chain_hash::hash_table::HashTable;
/// #
/// let mut table = HashTable::new();
/// table.insert(1, "one");
/// table.insert(5, "five");
///
/// // 1 and 5 share bucket 1 of 4.
/// assert_eq!(table.usage(), 1);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.find(5, |v| *v == "five"), Some(&"five"));
/// ```
pub struct HashTable<V> {
    buckets: Box<[Link<V>]>,
    usage: usize,
    populated: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("usage", &self.usage)
            .field("capacity", &self.capacity())
            .field("populated", &self.populated)
            .finish()
    }
}

/// Renders the table as a bucket-by-bucket dump.
///
/// ```text
/// Underlying array usage / length: 2/4
/// Total number of nodes: 3
/// [  0 ]: null
/// [  1 ]: 5 --> 1 -->
/// [  2 ]: 2 -->
/// [  3 ]: null
/// ```
///
/// Every entry is followed by `" --> "`, including the chain tail.
impl<V> Display for HashTable<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Underlying array usage / length: {}/{}",
            self.usage,
            self.capacity()
        )?;
        write!(f, "\nTotal number of nodes: {}", self.populated)?;

        for (index, head) in self.buckets.iter().enumerate() {
            write!(f, "\n[ {index:2} ]: ")?;
            if head.is_none() {
                f.write_str("null")?;
                continue;
            }
            for entry in Chain::new(head) {
                write!(f, "{} --> ", entry.value)?;
            }
        }

        Ok(())
    }
}

impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.iter().map(chain::clone_chain).collect(),
            usage: self.usage,
            populated: self.populated,
        }
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        for head in self.buckets.iter_mut() {
            chain::unlink(head.take());
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with exactly `capacity` buckets.
    ///
    /// A capacity of zero is replaced with [`DEFAULT_CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<u32> = HashTable::with_capacity(10);
    /// assert_eq!(table.capacity(), 10);
    ///
    /// let table: HashTable<u32> = HashTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 4);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };

        Self {
            buckets: empty_buckets(capacity),
            usage: 0,
            populated: 0,
        }
    }

    /// Returns the number of stored entries, duplicates included.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets holding at least one entry.
    pub fn usage(&self) -> usize {
        self.usage
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `usage / capacity`.
    ///
    /// This is recomputed on every call and may exceed
    /// [`LOAD_FACTOR_THRESHOLD`] between insertions.
    pub fn load_factor(&self) -> f64 {
        self.usage as f64 / self.buckets.len() as f64
    }

    /// Inserts `value` under `hash`.
    ///
    /// Rebuilds into twice as many buckets first if the load factor has
    /// reached [`LOAD_FACTOR_THRESHOLD`].
    ///
    /// # Panics
    ///
    /// Panics if doubling the bucket count overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for hash in 0..3 {
    ///     table.insert(hash, hash);
    /// }
    /// // 3/4 buckets in use: the next insertion grows the table first.
    /// assert_eq!(table.capacity(), 4);
    /// table.insert(3, 3);
    /// assert_eq!(table.capacity(), 8);
    /// ```
    pub fn insert(&mut self, hash: u64, value: V) {
        if at_threshold(self.usage, self.buckets.len()) {
            self.rebuild();
        }

        self.place(hash, value);
    }

    /// Finds the first entry in the chain for `hash` that satisfies `eq`.
    ///
    /// Chains are scanned from the most recently inserted entry.
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = bucket_index(hash, self.buckets.len());
        Chain::new(&self.buckets[index])
            .map(|entry| &entry.value)
            .find(|value| eq(*value))
    }

    /// Returns `true` if the chain for `hash` holds a value satisfying `eq`.
    pub fn contains(&self, hash: u64, eq: impl Fn(&V) -> bool) -> bool {
        self.find(hash, eq).is_some()
    }

    /// All stored values, bucket by bucket, each chain head to tail.
    pub(crate) fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.buckets
            .iter()
            .flat_map(Chain::new)
            .map(|entry| &entry.value)
    }

    /// Places `value` without checking the load factor.
    #[inline]
    fn place(&mut self, hash: u64, value: V) {
        let index = bucket_index(hash, self.buckets.len());
        if chain::push_front(&mut self.buckets[index], hash, value) {
            self.usage += 1;
        }
        self.populated += 1;

        debug_assert!(self.usage <= self.buckets.len());
        debug_assert!(self.usage <= self.populated);
    }

    #[cold]
    fn rebuild(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity.checked_mul(2).expect("capacity overflow");
        let old_buckets = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let moved = self.populated;

        self.usage = 0;
        self.populated = 0;
        for head in old_buckets.into_vec() {
            for (hash, value) in IntoChain::new(head) {
                self.place(hash, value);
            }
        }

        debug_assert_eq!(self.populated, moved);
        log::debug!(
            "rebuilt chained table: {old_capacity} -> {new_capacity} buckets, {moved} entries, {} buckets in use",
            self.usage
        );
    }

    /// Computes a histogram of chain lengths.
    ///
    /// Index `n` of the returned vector counts the buckets whose chain holds
    /// exactly `n` entries, so index 0 counts the empty buckets. The vector is
    /// as long as the longest chain plus one.
    #[cfg(feature = "stats")]
    pub fn chain_histogram(&self) -> alloc::vec::Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        for head in self.buckets.iter() {
            let length = Chain::new(head).count();
            if length >= hist.len() {
                hist.resize(length + 1, 0);
            }
            hist[length] += 1;
        }
        hist
    }

    /// Returns chain-length and utilization statistics.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.chain_histogram();

        DebugStats {
            usage: self.usage,
            capacity: self.buckets.len(),
            total_entries: self.populated,
            load_factor: self.load_factor(),
            empty_buckets: hist[0],
            longest_chain: hist.len() - 1,
            mean_chain_length: if self.usage == 0 {
                0.0
            } else {
                self.populated as f64 / self.usage as f64
            },
        }
    }
}
