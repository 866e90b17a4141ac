//! Hash containers built on *hashbrown* with a fixed *foldhash* seed.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

pub use hashbrown::hash_table::{self, HashTable};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::*;

    #[test]
    fn fixed_state_is_deterministic() {
        let a = FixedHashState.hash_one("__recast");
        let b = FixedHashState.hash_one("__recast");
        assert_eq!(a, b);
        assert_ne!(a, FixedHashState.hash_one("__encodedValue"));
    }

    #[test]
    fn noop_state_passes_u64_through() {
        assert_eq!(NoOpHashState.hash_one(42_u64), 42);
    }

    #[test]
    fn map_alias_uses_fixed_state() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.insert("k", 1);
        assert_eq!(map.get("k"), Some(&1));
    }
}
