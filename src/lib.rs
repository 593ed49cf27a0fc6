#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Raw separate-chaining storage.
///
/// This module provides `ChainTable`, a fixed-size array of chains driven by
/// caller-supplied hashes and equality predicates. `HashTable` is built on
/// it.
pub mod chain_table;

mod config;
mod error;

/// An insertion-ordered hash table using separate chaining.
///
/// This module provides `HashTable`, which wraps a `ChainTable` and adds key
/// hashing, insertion order, and load-factor driven growth.
pub mod hash_table;

#[cfg(all(test, feature = "std"))]
mod hash_table_proptest;

#[cfg(feature = "stats")]
mod stats;

pub use config::Config;
pub use config::DEFAULT_CAPACITY;
pub use config::DEFAULT_LOAD_FACTOR_THRESHOLD;
pub use config::DefaultHashBuilder;
pub use error::Error;
pub use error::InvalidArgument;
pub use error::Result;
pub use hash_table::HashTable;
#[cfg(feature = "stats")]
pub use stats::ChainStats;
