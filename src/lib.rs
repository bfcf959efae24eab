//! Two hash-table engines sharing one node-storage and linking layer.
//!
//!   dense engine (`dense` module):
//!
//!      buckets:                  dense (a contiguous Vec, insertion order
//!     -----------                unless otherwise disturbed by erase):
//!    |   index   |              ------------------------------------
//!    |-----------|             | value | hash | next | (link) | ... |
//!    |-----------|              ------------------------------------
//!    |    NIL    |                ^                            ^
//!     -----------                 |_ dense[0]                  |_ last
//!
//!     A bucket holds the dense index of the first entry in its
//!     collision chain; each entry's `next` field continues the chain.
//!     Erase snips the target out of its chain, then `swap_remove`s it
//!     (the last entry takes its place, so chain/order pointers that
//!     referenced the last entry are repointed first).
//!
//!   sparse engine (`sparse` module):
//!
//!     An open-addressed SwissTable: one metadata byte per slot (top bit
//!     set for EMPTY/DELETED, clear for occupied, low 7 bits a second
//!     hash fragment for occupied slots), matched `BLOCK` bytes at a time
//!     against a SIMD register (SSE2/NEON) or a portable 64-bit SWAR
//!     fallback, with triangular-number probing over the metadata array.
//!
//! Both engines are generic over a [`traits::ValueTraits`] policy
//! distinguishing set semantics (key *is* the value) from map semantics
//! (key projected out of a `(K, M)` pair), a node storage discipline
//! (packed inline, or heap-indirected for pointer stability and node
//! extraction), and a link discipline (`NoLink` for unordered iteration,
//! [`link::OrderedLink`] for insertion order).
//!
//! Hashing defaults to [`hash::FxBuildHasher`], but every table is generic
//! over any [`core::hash::BuildHasher`].

pub mod dense;
pub mod error;
pub mod hash;
pub mod link;
pub mod node;
pub mod sparse;
pub mod traits;

pub use dense::multi::DenseMultiTable2;
pub use dense::{DenseTable, OrderedDenseTable};
pub use error::{Result, TableError};
pub use hash::{FxBuildHasher, FxHasher};
pub use link::{Link, NoLink, OrderedLink};
pub use node::{ExtractedNode, NodeStorage, Packed, Stable};
pub use sparse::{
    OrderedPackedSparseTable, OrderedStableSparseTable, PackedSparseTable, SparseTable,
    StableSparseTable,
};
pub use traits::{MapTraits, SetTraits, ValueTraits};

/// A dense hash set: `DenseSet<K>` stores `K` directly, with no mapped
/// value.
pub type DenseSet<K, S = FxBuildHasher> = DenseTable<K, K, SetTraits<K>, S>;
/// An insertion-ordered dense hash set.
pub type OrderedDenseSet<K, S = FxBuildHasher> = OrderedDenseTable<K, K, SetTraits<K>, S>;
/// A dense hash map from `K` to `M`.
pub type DenseMap<K, M, S = FxBuildHasher> = DenseTable<K, (K, M), MapTraits<K, M>, S>;
/// An insertion-ordered dense hash map.
pub type OrderedDenseMap<K, M, S = FxBuildHasher> =
    OrderedDenseTable<K, (K, M), MapTraits<K, M>, S>;

/// A sparse (SwissTable) hash set with packed inline storage.
pub type SparseSet<K, S = FxBuildHasher> = PackedSparseTable<K, K, SetTraits<K>, S>;
/// An insertion-ordered sparse hash set with packed inline storage.
pub type OrderedSparseSet<K, S = FxBuildHasher> = OrderedPackedSparseTable<K, K, SetTraits<K>, S>;
/// A sparse (SwissTable) hash map with packed inline storage.
pub type SparseMap<K, M, S = FxBuildHasher> = PackedSparseTable<K, (K, M), MapTraits<K, M>, S>;
/// An insertion-ordered sparse hash map with packed inline storage.
pub type OrderedSparseMap<K, M, S = FxBuildHasher> =
    OrderedPackedSparseTable<K, (K, M), MapTraits<K, M>, S>;

/// A sparse hash map with pointer-stable, extractable storage.
pub type StableSparseMap<K, M, S = FxBuildHasher> =
    StableSparseTable<K, (K, M), MapTraits<K, M>, S>;
/// An insertion-ordered, pointer-stable, extractable sparse hash map.
pub type OrderedStableSparseMap<K, M, S = FxBuildHasher> =
    OrderedStableSparseTable<K, (K, M), MapTraits<K, M>, S>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_aliases_construct_and_interoperate() {
        let mut set: DenseSet<i32> = DenseSet::default();
        set.insert(1);
        assert!(set.contains_key(&1));

        let mut map: SparseMap<String, i32> = SparseMap::default();
        map.insert(("x".to_string(), 10));
        assert_eq!(map.get("x").unwrap().1, 10);

        let mut ordered: OrderedDenseSet<i32> = OrderedDenseSet::default();
        for i in [5, 3, 1] {
            ordered.insert(i);
        }
        assert_eq!(ordered.iter().copied().collect::<Vec<_>>(), vec![5, 3, 1]);
    }
}
