//! chained-map: a single-threaded map from owned strings to owned strings,
//! backed by a fixed number of buckets with separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - A `ChainedMap` holds a fixed-length array of bucket heads. Each head
//!   is empty or links the first entry of a singly linked chain; chains are
//!   unordered and new keys are appended at the tail.
//! - Entries live in an arena (`slotmap::SlotMap`) owned by the map. Chain
//!   links are generational arena keys, so ownership is a tree: map ->
//!   arena -> entry -> key/value strings. There is no shared ownership.
//! - Keys are hashed with a polynomial rolling hash (`acc * 31 + byte`,
//!   32-bit wrapping) and reduced modulo the bucket count.
//!
//! Constraints
//! - The bucket count is fixed at construction; there is no resize path.
//! - Keys are unique within a chain. Inserting an existing key replaces its
//!   value; the stored key is not re-copied.
//! - Stored strings are independent copies of the caller's buffers.
//! - An entry becomes reachable only after both of its copies succeeded.
//!   Allocation failure while copying is returned as
//!   `InsertError::OutOfMemory` and leaves the map unchanged.
//! - No removal of single keys. `destroy` releases everything at once.
//!
//! Lifecycle
//! - `ChainedMap::new` / `with_config` / `with_bucket_count` create a map
//!   with every bucket empty.
//! - `insert` and `get` are valid while the map is live.
//! - `destroy(self)` walks every chain head to tail and releases each entry,
//!   then the bucket array, and reports the counts. Since it takes the map
//!   by value, use after teardown does not compile. Plain `drop` releases the
//!   same memory without the report.
//!
//! Concurrency
//! - No internal locking. Mutation takes `&mut self`, so concurrent
//!   insert/insert or insert/get is rejected at compile time rather than
//!   guarded at runtime.
//!
//! ```
//! use chained_map::ChainedMap;
//!
//! let mut map = ChainedMap::new();
//! map.insert("apple", "red").unwrap();
//! map.insert("banana", "yellow").unwrap();
//! map.insert("apple", "green").unwrap();
//!
//! assert_eq!(map.get("apple"), Some("green"));
//! assert_eq!(map.get("orange"), None);
//!
//! let report = map.destroy();
//! assert_eq!(report.entries_released, 2);
//! ```

mod chained_map;
mod chained_map_proptest;
pub mod config;
mod entry;
pub mod error;
pub mod hash;

// Public surface
pub use chained_map::{ChainedMap, Iter, Teardown};
pub use config::{TableConfig, DEFAULT_BUCKET_COUNT};
pub use error::{ConfigError, CopyTarget, InsertError};
pub use hash::{bucket_index, polynomial_hash, KeyHash, PolynomialHash};
