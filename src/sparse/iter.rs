//! Iterators over the sparse engine (spec §4.6): a forward walk over the
//! `Option`-tagged node array for unordered tables (skipping vacated
//! slots), and a linked traversal for ordered ones, mirroring
//! [`crate::dense::iter`].
//!
//! The packed variant here does not re-derive occupancy from the
//! metadata bytes the way the SIMD probe does: the node array's `Option`
//! discriminant already says whether a slot is live, and consulting that
//! instead of re-running `match_available` bit games keeps this iterator
//! trivially correct without a compiler to check the unsafe alternative.

use super::Slot;
use crate::link::{Link, NIL};

enum Mode<'a, V, Disc, L> {
    Packed(core::slice::Iter<'a, Option<Slot<Disc, L>>>),
    Ordered {
        nodes: &'a [Option<Slot<Disc, L>>],
        cur: u32,
    },
    #[allow(dead_code)]
    _Marker(core::marker::PhantomData<&'a V>),
}

/// Forward iterator over a sparse table's elements.
pub struct Iter<'a, V, Disc, L> {
    mode: Mode<'a, V, Disc, L>,
}

impl<'a, V, Disc, L: Link> Iter<'a, V, Disc, L>
where
    Disc: crate::node::NodeStorage<V>,
{
    pub(super) fn packed(nodes: &'a [Option<Slot<Disc, L>>]) -> Self {
        Self {
            mode: Mode::Packed(nodes.iter()),
        }
    }

    pub(super) fn ordered(nodes: &'a [Option<Slot<Disc, L>>], head: u32) -> Self {
        Self {
            mode: Mode::Ordered { nodes, cur: head },
        }
    }
}

impl<'a, V, Disc, L: Link> Iterator for Iter<'a, V, Disc, L>
where
    Disc: crate::node::NodeStorage<V>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.mode {
            Mode::Packed(it) => loop {
                match it.next() {
                    None => return None,
                    Some(None) => continue,
                    Some(Some(slot)) => return Some(slot.storage.value()),
                }
            },
            Mode::Ordered { nodes, cur } => {
                if *cur == NIL {
                    None
                } else {
                    let slot = nodes[*cur as usize].as_ref().expect("linked slot is live");
                    *cur = slot.link.next();
                    Some(slot.storage.value())
                }
            }
            Mode::_Marker(_) => unreachable!(),
        }
    }
}

enum ModeMut<'a, V, Disc, L> {
    Packed(core::slice::IterMut<'a, Option<Slot<Disc, L>>>),
    Ordered {
        nodes: *mut Option<Slot<Disc, L>>,
        len: usize,
        cur: u32,
        _marker: core::marker::PhantomData<&'a mut [Option<Slot<Disc, L>>]>,
    },
    #[allow(dead_code)]
    _Marker(core::marker::PhantomData<&'a mut V>),
}

/// Mutable forward iterator over a sparse table's elements.
pub struct IterMut<'a, V, Disc, L> {
    mode: ModeMut<'a, V, Disc, L>,
}

impl<'a, V, Disc, L: Link> IterMut<'a, V, Disc, L>
where
    Disc: crate::node::NodeStorage<V>,
{
    pub(super) fn packed(nodes: &'a mut [Option<Slot<Disc, L>>]) -> Self {
        Self {
            mode: ModeMut::Packed(nodes.iter_mut()),
        }
    }

    pub(super) fn ordered(nodes: &'a mut [Option<Slot<Disc, L>>], head: u32) -> Self {
        let len = nodes.len();
        Self {
            mode: ModeMut::Ordered {
                nodes: nodes.as_mut_ptr(),
                len,
                cur: head,
                _marker: core::marker::PhantomData,
            },
        }
    }
}

impl<'a, V, Disc, L: Link> Iterator for IterMut<'a, V, Disc, L>
where
    Disc: crate::node::NodeStorage<V>,
{
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.mode {
            ModeMut::Packed(it) => loop {
                match it.next() {
                    None => return None,
                    Some(None) => continue,
                    Some(Some(slot)) => return Some(slot.storage.value_mut()),
                }
            },
            ModeMut::Ordered { nodes, len, cur, .. } => {
                if *cur == NIL {
                    None
                } else {
                    debug_assert!((*cur as usize) < *len);
                    // SAFETY: the ordered link chain visits each index at
                    // most once, so this mutable borrow never aliases a
                    // previously yielded one; `cur` stays within `len`.
                    let slot = unsafe { &mut *nodes.add(*cur as usize) }
                        .as_mut()
                        .expect("linked slot is live");
                    *cur = slot.link.next();
                    Some(slot.storage.value_mut())
                }
            }
            ModeMut::_Marker(_) => unreachable!(),
        }
    }
}
