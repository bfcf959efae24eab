//! Dense engine (spec §4.4): a bucket-index array plus a contiguous,
//! append-mostly node vector, with singly linked collision chains and
//! swap-with-last erase.
//!
//! This is the single-key engine; the N-key chaining variant lives in
//! [`crate::dense::multi`].

pub mod iter;
pub mod multi;

use crate::error::{Result, TableError};
use crate::link::{Link, NoLink, OrderedLink, NIL};
use crate::traits::ValueTraits;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;

pub use iter::{Iter, IterMut};

const DEFAULT_MAX_LOAD_NUM: u64 = 7;
const DEFAULT_MAX_LOAD_DEN: u64 = 8;

/// One dense-array slot: the value itself, its cached key hash, the next
/// index in its bucket's collision chain, and (for ordered variants) its
/// insertion-order neighbors.
#[derive(Debug, Clone)]
struct Node<V, L> {
    value: V,
    hash: u64,
    next: u32,
    link: L,
}

/// The dense engine. `T` is the [`ValueTraits`] policy (set vs. map);
/// `S` the hasher-builder; `L` the link discipline (`NoLink` for
/// unordered, `OrderedLink` for insertion-ordered).
pub struct DenseTable<K, V, T, S, L = NoLink>
where
    T: ValueTraits<Key = K, Value = V>,
{
    buckets: Vec<u32>,
    dense: Vec<Node<V, L>>,
    hash_builder: S,
    head: u32,
    tail: u32,
    max_load_num: u64,
    max_load_den: u64,
    _traits: PhantomData<T>,
}

impl<K, V, T, S, L> DenseTable<K, V, T, S, L>
where
    T: ValueTraits<Key = K, Value = V>,
    S: BuildHasher,
    L: Link,
    K: Hash + Eq,
{
    /// Builds an empty table using `hash_builder` for hashing. No buckets
    /// are allocated until the first insert (spec §4.4 step 1/2).
    #[must_use]
    pub fn new(hash_builder: S) -> Self {
        Self {
            buckets: Vec::new(),
            dense: Vec::new(),
            hash_builder,
            head: NIL,
            tail: NIL,
            max_load_num: DEFAULT_MAX_LOAD_NUM,
            max_load_den: DEFAULT_MAX_LOAD_DEN,
            _traits: PhantomData,
        }
    }

    /// Builds an empty table pre-sized to hold at least `capacity`
    /// elements without rehashing.
    #[must_use]
    pub fn with_capacity(capacity: usize, hash_builder: S) -> Self {
        let mut table = Self::new(hash_builder);
        table.reserve(capacity);
        table
    }

    /// Builds a table from a range of values, in iteration order, keeping
    /// the first entry for any duplicate key (spec §6 `new_from_range`).
    #[must_use]
    pub fn new_from_range<I>(values: I, hash_builder: S) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut table = Self::new(hash_builder);
        for value in values {
            table.insert(value);
        }
        table
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.dense.capacity()
    }

    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.dense.len() as f64 / self.buckets.len() as f64
        }
    }

    #[inline]
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Configured load factor threshold that triggers a grow rehash on
    /// insert. Defaults to 7/8 (spec §6 constants).
    #[inline]
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_num as f64 / self.max_load_den as f64
    }

    /// Theoretical upper bound on `len()`, limited only by `u32` node
    /// indices.
    #[inline]
    #[must_use]
    pub fn max_size(&self) -> usize {
        u32::MAX as usize
    }

    /// Removes every element. Capacity (both arrays) is retained.
    pub fn clear(&mut self) {
        self.dense.clear();
        for b in &mut self.buckets {
            *b = NIL;
        }
        self.head = NIL;
        self.tail = NIL;
    }

    #[inline]
    fn hash_of<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        crate::hash::hash_one(&self.hash_builder, key)
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        debug_assert!(self.buckets.len().is_power_of_two());
        (hash as usize) & (self.buckets.len() - 1)
    }

    /// Finds the dense index for `key`, if present.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_of(key);
        let mut cur = self.buckets[self.bucket_of(hash)];
        while cur != NIL {
            let node = &self.dense[cur as usize];
            if node.hash == hash && T::key(&node.value).borrow() == key {
                return Some(cur);
            }
            cur = node.next;
        }
        None
    }

    #[inline]
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    #[inline]
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|idx| &self.dense[idx as usize].value)
    }

    #[inline]
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key)
            .map(move |idx| &mut self.dense[idx as usize].value)
    }

    /// `at`-style accessor returning the distinguished not-found error
    /// (spec §7) instead of panicking.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(TableError::KeyNotFound)
    }

    fn grow_buckets_to(&mut self, want: usize) {
        let mut new_count = self.buckets.len().max(8);
        while new_count < want {
            new_count *= 2;
        }
        if new_count == self.buckets.len() {
            return;
        }
        self.buckets = vec![NIL; new_count];
        for idx in 0..self.dense.len() as u32 {
            let hash = self.dense[idx as usize].hash;
            let bucket = (hash as usize) & (new_count - 1);
            self.dense[idx as usize].next = self.buckets[bucket];
            self.buckets[bucket] = idx;
        }
    }

    fn maybe_grow_for_insert(&mut self) {
        if self.buckets.is_empty() {
            self.grow_buckets_to(8);
            return;
        }
        let would_be = (self.dense.len() + 1) as u64;
        if would_be * self.max_load_den > self.buckets.len() as u64 * self.max_load_num {
            self.grow_buckets_to(self.buckets.len() * 2);
        }
    }

    /// Reserves capacity for at least `additional` more elements without
    /// reallocating (a no-op on an already-sufficient table, per spec §8
    /// boundary property "`reserve(0)`/`rehash(0)` on an empty table are
    /// no-ops").
    pub fn reserve(&mut self, additional: usize) {
        if additional == 0 {
            return;
        }
        self.dense.reserve(additional);
        let want = self.dense.len() + additional;
        let mut need_buckets = self.buckets.len().max(8);
        while (want as u64) * self.max_load_den > need_buckets as u64 * self.max_load_num {
            need_buckets *= 2;
        }
        self.grow_buckets_to(need_buckets);
    }

    /// Rebuilds the bucket index without changing membership (spec §8
    /// property 8: observationally a no-op).
    pub fn rehash(&mut self, bucket_count_hint: usize) {
        if bucket_count_hint == 0 && (!self.buckets.is_empty() || self.dense.is_empty()) {
            return;
        }
        let min_needed = {
            let mut n = 8usize;
            while (self.dense.len() as u64) * self.max_load_den > n as u64 * self.max_load_num {
                n *= 2;
            }
            n
        };
        let target = bucket_count_hint.max(min_needed).next_power_of_two();
        self.buckets = vec![NIL; target.max(8)];
        for idx in 0..self.dense.len() as u32 {
            let hash = self.dense[idx as usize].hash;
            let bucket = (hash as usize) & (self.buckets.len() - 1);
            self.dense[idx as usize].next = self.buckets[bucket];
            self.buckets[bucket] = idx;
        }
    }

    fn link_at_tail(&mut self, idx: u32) {
        if !L::ENABLED {
            return;
        }
        let mut link = L::default();
        link.set_prev(self.tail);
        link.set_next(NIL);
        self.dense[idx as usize].link = link;
        if self.tail == NIL {
            self.head = idx;
        } else {
            self.dense[self.tail as usize].link.set_next(idx);
        }
        self.tail = idx;
    }

    /// Inserts `value` if no entry with its key exists yet.
    ///
    /// Returns `(index, true)` on a fresh insert, `(index, false)` and
    /// leaves the table unchanged if the key was already present (spec §8
    /// property 2).
    pub fn insert(&mut self, value: V) -> (u32, bool) {
        let hash = self.hash_of(T::key(&value));
        if let Some(existing) = self.find_by_hash(hash, T::key(&value)) {
            return (existing, false);
        }
        self.maybe_grow_for_insert();
        let idx = self.dense.len() as u32;
        self.dense.push(Node {
            value,
            hash,
            next: NIL,
            link: L::default(),
        });
        let bucket = self.bucket_of(hash);
        self.dense[idx as usize].next = self.buckets[bucket];
        self.buckets[bucket] = idx;
        self.link_at_tail(idx);
        (idx, true)
    }

    /// Constructs and inserts a value for `key` only if it is absent,
    /// building the value lazily via `make` so a duplicate key never pays
    /// for a throwaway construction (spec §6 `try_emplace`).
    pub fn try_emplace<F>(&mut self, key: &K, make: F) -> (u32, bool)
    where
        F: FnOnce() -> V,
    {
        let hash = self.hash_of(key);
        if let Some(existing) = self.find_by_hash(hash, key) {
            return (existing, false);
        }
        self.maybe_grow_for_insert();
        let idx = self.dense.len() as u32;
        self.dense.push(Node {
            value: make(),
            hash,
            next: NIL,
            link: L::default(),
        });
        let bucket = self.bucket_of(hash);
        self.dense[idx as usize].next = self.buckets[bucket];
        self.buckets[bucket] = idx;
        self.link_at_tail(idx);
        (idx, true)
    }

    /// Alias for [`Self::try_emplace`], kept as a distinct name for parity
    /// with the two related spec operations.
    #[inline]
    pub fn emplace<F>(&mut self, key: &K, make: F) -> (u32, bool)
    where
        F: FnOnce() -> V,
    {
        self.try_emplace(key, make)
    }

    /// Like [`Self::try_emplace`], but overwrites an existing entry's
    /// value with a freshly constructed one instead of leaving it alone.
    pub fn emplace_or_replace<F>(&mut self, key: &K, make: F) -> (u32, bool)
    where
        F: FnOnce() -> V,
    {
        let hash = self.hash_of(key);
        if let Some(idx) = self.find_by_hash(hash, key) {
            self.dense[idx as usize].value = make();
            return (idx, false);
        }
        self.maybe_grow_for_insert();
        let idx = self.dense.len() as u32;
        self.dense.push(Node {
            value: make(),
            hash,
            next: NIL,
            link: L::default(),
        });
        let bucket = self.bucket_of(hash);
        self.dense[idx as usize].next = self.buckets[bucket];
        self.buckets[bucket] = idx;
        self.link_at_tail(idx);
        (idx, true)
    }

    fn find_by_hash(&self, hash: u64, key: &K) -> Option<u32> {
        if self.buckets.is_empty() {
            return None;
        }
        let mut cur = self.buckets[self.bucket_of(hash)];
        while cur != NIL {
            let node = &self.dense[cur as usize];
            if node.hash == hash && T::key(&node.value) == key {
                return Some(cur);
            }
            cur = node.next;
        }
        None
    }

    /// Inserts `value`, overwriting any existing entry with the same key.
    /// Always returns `inserted: true` iff the key was previously absent
    /// (spec §8 property 3).
    pub fn insert_or_assign(&mut self, value: V) -> (u32, bool) {
        let hash = self.hash_of(T::key(&value));
        if let Some(idx) = self.find_by_hash(hash, T::key(&value)) {
            self.dense[idx as usize].value = value;
            return (idx, false);
        }
        self.insert(value)
    }

    /// Removes the entry for `key`, if present, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(key)?;
        Some(self.erase_at(idx))
    }

    /// Links `idx` into the order list directly before `hint`, or at the
    /// tail when `hint` is `None` (spec §6 `insert_with_hint`). Has no
    /// observable effect on an unordered table.
    fn link_before(&mut self, idx: u32, hint: Option<u32>) {
        if !L::ENABLED {
            return;
        }
        let Some(before) = hint else {
            self.link_at_tail(idx);
            return;
        };
        let prev = self.dense[before as usize].link.prev();
        let mut link = L::default();
        link.set_prev(prev);
        link.set_next(before);
        self.dense[idx as usize].link = link;
        if prev == NIL {
            self.head = idx;
        } else {
            self.dense[prev as usize].link.set_next(idx);
        }
        self.dense[before as usize].link.set_prev(idx);
    }

    /// Like [`Self::insert`], but places the new entry in insertion order
    /// immediately before the element at `hint` (or at the tail if
    /// `hint` is `None`) rather than always appending.
    pub fn insert_with_hint(&mut self, value: V, hint: Option<u32>) -> (u32, bool) {
        let hash = self.hash_of(T::key(&value));
        if let Some(existing) = self.find_by_hash(hash, T::key(&value)) {
            return (existing, false);
        }
        self.maybe_grow_for_insert();
        let idx = self.dense.len() as u32;
        self.dense.push(Node {
            value,
            hash,
            next: NIL,
            link: L::default(),
        });
        let bucket = self.bucket_of(hash);
        self.dense[idx as usize].next = self.buckets[bucket];
        self.buckets[bucket] = idx;
        self.link_before(idx, hint);
        (idx, true)
    }

    fn unlink_from_bucket_chain(&mut self, target: u32) {
        let bucket = self.bucket_of(self.dense[target as usize].hash);
        let mut cur = self.buckets[bucket];
        if cur == target {
            self.buckets[bucket] = self.dense[target as usize].next;
            return;
        }
        while cur != NIL {
            let next = self.dense[cur as usize].next;
            if next == target {
                self.dense[cur as usize].next = self.dense[target as usize].next;
                return;
            }
            cur = next;
        }
    }

    /// Repoints whatever referenced dense index `old` (bucket head or a
    /// chain `next`) to `new` instead, used right before `swap_remove`
    /// relocates the last element into a freed slot.
    fn repoint_bucket_chain(&mut self, old: u32, new: u32) {
        let bucket = self.bucket_of(self.dense[old as usize].hash);
        if self.buckets[bucket] == old {
            self.buckets[bucket] = new;
            return;
        }
        let mut cur = self.buckets[bucket];
        while cur != NIL {
            if self.dense[cur as usize].next == old {
                self.dense[cur as usize].next = new;
                return;
            }
            cur = self.dense[cur as usize].next;
        }
    }

    fn unlink_order(&mut self, idx: u32) {
        if !L::ENABLED {
            return;
        }
        let link = self.dense[idx as usize].link;
        if link.prev() == NIL {
            self.head = link.next();
        } else {
            self.dense[link.prev() as usize].link.set_next(link.next());
        }
        if link.next() == NIL {
            self.tail = link.prev();
        } else {
            self.dense[link.next() as usize].link.set_prev(link.prev());
        }
    }

    fn repoint_order(&mut self, old: u32, new: u32) {
        if !L::ENABLED {
            return;
        }
        let link = self.dense[old as usize].link;
        if link.prev() == NIL {
            self.head = new;
        } else {
            self.dense[link.prev() as usize].link.set_next(new);
        }
        if link.next() == NIL {
            self.tail = new;
        } else {
            self.dense[link.next() as usize].link.set_prev(new);
        }
    }

    /// Erases the element at dense index `idx`, per the spec §4.4 ordering
    /// rule: snip chains first, then swap-with-last, then drop the tail.
    fn erase_at(&mut self, idx: u32) -> V {
        self.unlink_from_bucket_chain(idx);
        self.unlink_order(idx);
        let last = (self.dense.len() - 1) as u32;
        if idx != last {
            self.repoint_bucket_chain(last, idx);
            self.repoint_order(last, idx);
        }
        self.dense.swap_remove(idx as usize).value
    }

    /// Erases the element at dense index `idx` directly (used by
    /// iterator-based erase at the façade layer).
    pub fn erase(&mut self, idx: u32) -> V {
        self.erase_at(idx)
    }

    /// Erases every element from `first` (inclusive) to `last`
    /// (exclusive) in insertion order, returning the count removed (spec
    /// §6 `erase_range`). Walks the order list by key rather than by raw
    /// dense index, since `swap_remove` relocates the last element into
    /// whichever slot each erase frees and raw indices would go stale
    /// mid-range. Meaningful only on an ordered table; on an unordered one
    /// there is no canonical "first..last" to begin with, so only `first`
    /// itself (if it isn't `last`) is removed.
    pub fn erase_range(&mut self, first: u32, last: u32) -> usize
    where
        K: Clone,
    {
        let mut keys = Vec::new();
        let mut cur = first;
        while cur != last && cur != NIL {
            keys.push(T::key(&self.dense[cur as usize].value).clone());
            cur = if L::ENABLED {
                self.dense[cur as usize].link.next()
            } else {
                NIL
            };
        }
        for key in &keys {
            self.remove(key);
        }
        keys.len()
    }

    /// Exchanges the entire contents of `self` and `other` in constant
    /// time (spec §6 `swap`).
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.buckets, &mut other.buckets);
        core::mem::swap(&mut self.dense, &mut other.dense);
        core::mem::swap(&mut self.hash_builder, &mut other.hash_builder);
        core::mem::swap(&mut self.head, &mut other.head);
        core::mem::swap(&mut self.tail, &mut other.tail);
        core::mem::swap(&mut self.max_load_num, &mut other.max_load_num);
        core::mem::swap(&mut self.max_load_den, &mut other.max_load_den);
    }

    #[must_use]
    pub fn front(&self) -> Option<&V>
    where
        L: Link,
    {
        if self.head == NIL {
            None
        } else {
            Some(&self.dense[self.head as usize].value)
        }
    }

    #[must_use]
    pub fn back(&self) -> Option<&V> {
        if self.tail == NIL {
            None
        } else {
            Some(&self.dense[self.tail as usize].value)
        }
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, V, L> {
        if L::ENABLED {
            Iter::ordered(&self.dense, self.head)
        } else {
            Iter::packed(&self.dense)
        }
    }

    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, V, L> {
        if L::ENABLED {
            IterMut::ordered(&mut self.dense, self.head)
        } else {
            IterMut::packed(&mut self.dense)
        }
    }
}

impl<K, V, T, S, L> Default for DenseTable<K, V, T, S, L>
where
    T: ValueTraits<Key = K, Value = V>,
    S: Default + BuildHasher,
    L: Link,
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Convenience alias: an insertion-ordered dense table.
pub type OrderedDenseTable<K, V, T, S> = DenseTable<K, V, T, S, OrderedLink>;
