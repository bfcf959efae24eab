//! Stable (pointer-indirected) node storage, and the move-only handle used
//! to transfer an entry between tables (spec §4.3/§4.5 extract).

use super::NodeStorage;

/// Value stored behind its own heap allocation. Relocating a `Stable<V>`
/// during rehash moves only the `Box` pointer, so `&V`/`&mut V` obtained
/// before a rehash remain valid afterward -- this is what makes
/// `extract`/`insert_node` round-trip an identity rather than a copy.
#[derive(Debug)]
pub struct Stable<V>(Box<V>);

impl<V> NodeStorage<V> for Stable<V> {
    #[inline]
    fn construct(value: V) -> Self {
        Self(Box::new(value))
    }

    #[inline]
    fn value(&self) -> &V {
        &self.0
    }

    #[inline]
    fn value_mut(&mut self) -> &mut V {
        &mut self.0
    }

    #[inline]
    fn into_value(self) -> V {
        *self.0
    }
}

impl<V> Clone for Stable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        Self(Box::new((*self.0).clone()))
    }
}

/// A move-only owning handle to a node detached from its table by
/// `extract`.
///
/// Re-inserting a handle into a *different* table is only a pointer
/// transplant when the two tables' hashers agree on how to hash the key
/// (checked by the façade, not by this handle); this core always performs
/// the transplant and leaves equality-of-hasher as the caller's contract,
/// matching the source's "allocators compare equal" precondition (§5)
/// generalized to "hashers must be compatible".
#[derive(Debug)]
pub struct ExtractedNode<V> {
    storage: Stable<V>,
    hash: u64,
}

impl<V> ExtractedNode<V> {
    #[inline]
    #[must_use]
    pub(crate) fn new(storage: Stable<V>, hash: u64) -> Self {
        Self { storage, hash }
    }

    /// Borrows the detached value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &V {
        self.storage.value()
    }

    /// Mutably borrows the detached value.
    #[inline]
    #[must_use]
    pub fn value_mut(&mut self) -> &mut V {
        self.storage.value_mut()
    }

    #[inline]
    #[must_use]
    pub(crate) fn into_parts(self) -> (Stable<V>, u64) {
        (self.storage, self.hash)
    }

    /// Unwraps the handle, discarding the cached hash.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> V {
        self.storage.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_identity_survives_round_trip() {
        let storage = Stable::construct(String::from("pointer-stable"));
        let addr_before = storage.value() as *const String;
        let handle = ExtractedNode::new(storage, 7);
        let (storage, hash) = handle.into_parts();
        assert_eq!(hash, 7);
        let addr_after = storage.value() as *const String;
        assert_eq!(addr_before, addr_after);
    }

    #[test]
    fn into_value_unwraps() {
        let handle = ExtractedNode::new(Stable::construct(9_i32), 1);
        assert_eq!(handle.into_value(), 9);
    }
}
