//! Inline-packed node storage: the value lives directly in the engine's
//! slot array.

use super::NodeStorage;

/// Value stored directly inline. Relocating a `Packed<V>` during rehash
/// moves `V` itself (move-then-destroy-source), so `V`'s address changes.
#[derive(Debug, Clone)]
pub struct Packed<V>(V);

impl<V> NodeStorage<V> for Packed<V> {
    #[inline]
    fn construct(value: V) -> Self {
        Self(value)
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
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_value() {
        let node = Packed::construct(42_i32);
        assert_eq!(*node.value(), 42);
        assert_eq!(node.into_value(), 42);
    }

    #[test]
    fn replace_value_returns_old() {
        let mut node = Packed::construct(String::from("a"));
        let old = node.replace_value(String::from("b"));
        assert_eq!(old, "a");
        assert_eq!(node.value(), "b");
    }
}
