//! Hasher selection for mapping indexes and seen-sets.
//!
//! The `fxhash` feature swaps the standard SipHash-based `RandomState` for
//! `rustc-hash`'s `FxBuildHasher`. Iteration order of the crate's own
//! containers never depends on the hasher: mappings keep their entries in
//! a `Vec` and only use the hash table as a position index.

#[cfg(feature = "fxhash")]
pub type KeyHasher = rustc_hash::FxBuildHasher;

#[cfg(not(feature = "fxhash"))]
pub type KeyHasher = std::collections::hash_map::RandomState;

pub type FastHashMap<K, V> = std::collections::HashMap<K, V, KeyHasher>;

pub type FastHashSet<T> = std::collections::HashSet<T, KeyHasher>;
