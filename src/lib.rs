//! # chaintable: Separately Chained Hash Table
//!
//! An in-memory dictionary for any `Hash + Eq` key type, built on open
//! hashing with separate chaining.
//!
//! ## Key Features
//!
//! - **Chained buckets**: colliding keys share a slot through a singly linked
//!   chain; the newest entry of a slot is found first
//! - **Arena nodes**: chain nodes live in one vector with a free list, so
//!   removal and growth never clone keys or values
//! - **Prime growth**: once `len / bucket_size` exceeds the load limit, the
//!   next insertion grows the table to the smallest prime at least twice the
//!   current slot count
//! - **Safe misses**: lookups and removals of absent keys return `None`
//!
//! ## Quick Start
//!
//! ```rust
//! use chaintable::{Hashtable, next_prime};
//!
//! let mut table = Hashtable::new();
//! table.put("apple", 3);
//! table.put("pear", 5);
//! table.put("apple", 4);
//!
//! assert_eq!(table.get("apple"), Some(&4));
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.remove("plum"), None);
//! assert_eq!(table.bucket_size(), 2047);
//! assert_eq!(next_prime(2 * 2047), Some(4099));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod hash_map;

// Re-export core types
pub use config::{Config, HashtableConfig};
pub use error::{ChainTableError, Result};
pub use hash_map::{
    is_prime, next_prime, Hashtable, TableStats, DEFAULT_BUCKET_SIZE, DEFAULT_LOAD_LIMIT,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing chaintable v{}", VERSION);
}
