#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod chain;

pub mod hash_table;

/// A hash set backed by the chained hash table.
///
/// This module provides a `HashSet` that wraps the `HashTable` and hashes
/// values with a configurable hasher builder.
pub mod hash_set;

#[cfg(any(feature = "std", feature = "foldhash"))]
pub use hash_set::DefaultHashBuilder;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
