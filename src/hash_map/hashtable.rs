//! Hashtable - separately chained hash table with prime-sized growth
//!
//! Each slot of the table holds the head of a singly linked chain of entries
//! whose keys hash to that slot. Chains are stored in a node arena: links are
//! arena indices, vacated nodes go onto a free list and are reused by later
//! insertions. New entries are prepended, so the most recently inserted entry
//! of a slot is found first.
//!
//! Growth is lazy: `put` of a new key first checks whether `len / bucket_size`
//! already exceeds the load limit and, if so, rehashes into the smallest prime
//! number of slots that is at least twice the current one. Rehashing relinks
//! the existing nodes; no key or value is moved or cloned.
//!
//! # Examples
//!
//! ```rust
//! use chaintable::Hashtable;
//!
//! let mut table = Hashtable::<String, i32>::new();
//! table.put("hello".to_string(), 42);
//! assert_eq!(table.get("hello"), Some(&42));
//! assert_eq!(table.remove("missing"), None);
//! ```

use super::primes::next_prime;
use super::stats::TableStats;
use crate::config::{Config, HashtableConfig};
use crate::error::{ChainTableError, Result};
use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::mem;

/// Slot count used by [`Hashtable::new`]
pub const DEFAULT_BUCKET_SIZE: usize = 2047;

/// Load limit used when none is given
pub const DEFAULT_LOAD_LIMIT: f32 = 0.75;

/// Chain node
struct Entry<K, V> {
    key: K,
    value: V,
    /// Next node of the same chain
    next: Option<usize>,
}

/// Arena cell: a live chain node or a link in the free list
enum Node<K, V> {
    Occupied(Entry<K, V>),
    Vacant { next_free: Option<usize> },
}

/// Separately chained hash table.
///
/// Keys need `Hash + Eq`; lookups accept any borrowed form of the key, as
/// with `std::collections::HashMap`.
pub struct Hashtable<K, V> {
    /// Chain heads, one per slot
    slots: Vec<Option<usize>>,
    /// Node arena shared by all chains
    nodes: Vec<Node<K, V>>,
    /// Head of the vacated-node list
    free_head: Option<usize>,
    /// Number of live entries
    count: usize,
    load_limit: f32,
    resizes: usize,
}

/// Hash a key with the table's fixed hasher.
fn hash_key<Q: Hash + ?Sized>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Map a hash onto `0..capacity`.
///
/// The hash is unsigned, so there is no negative value to fold and the
/// reduction cannot overflow.
#[inline]
pub(crate) fn fold_hash(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}

/// Growth target for a table of `capacity` slots.
fn grown_capacity(capacity: usize) -> Result<usize> {
    capacity
        .checked_mul(2)
        .and_then(next_prime)
        .ok_or_else(|| ChainTableError::capacity_exhausted(capacity))
}

/// Allocate `capacity` empty slots, reporting allocation failure as an error.
fn allocate_slots(capacity: usize) -> Result<Vec<Option<usize>>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity).map_err(|_| {
        ChainTableError::out_of_memory(capacity.saturating_mul(mem::size_of::<Option<usize>>()))
    })?;
    slots.resize(capacity, None);
    Ok(slots)
}

impl<K, V> Hashtable<K, V> {
    fn from_slots(slots: Vec<Option<usize>>, load_limit: f32) -> Self {
        Self {
            slots,
            nodes: Vec::new(),
            free_head: None,
            count: 0,
            load_limit,
            resizes: 0,
        }
    }

    /// Number of stored key-value pairs
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots
    pub fn bucket_size(&self) -> usize {
        self.slots.len()
    }

    /// Configured growth threshold
    pub fn load_limit(&self) -> f32 {
        self.load_limit
    }

    /// Current `len / bucket_size`
    pub fn load_factor(&self) -> f32 {
        self.count as f32 / self.slots.len() as f32
    }

    /// Growth trigger: `len / bucket_size > load_limit`, evaluated in f64 so
    /// counts beyond f32 precision still compare exactly.
    fn exceeds_load_limit(&self) -> bool {
        self.count as f64 > self.load_limit as f64 * self.slots.len() as f64
    }

    /// Remove every entry. The slot count is kept.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.nodes.clear();
        self.free_head = None;
        self.count = 0;
    }

    /// Iterate over all entries in unspecified order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: self.nodes.iter(),
            remaining: self.count,
        }
    }

    /// Iterate over all keys in unspecified order
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterate over all values in unspecified order
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Iterate mutably over all values in unspecified order
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            nodes: self.nodes.iter_mut(),
            remaining: self.count,
        }
    }

    /// Walk the chain stored at `slot`, head first.
    ///
    /// Out-of-range slots yield an empty chain.
    pub fn chain(&self, slot: usize) -> Chain<'_, K, V> {
        Chain {
            nodes: &self.nodes,
            link: self.slots.get(slot).copied().flatten(),
        }
    }

    /// Snapshot of occupancy and chain shape
    pub fn stats(&self) -> TableStats {
        let mut occupied_slots = 0;
        let mut longest_chain = 0;
        for slot in 0..self.slots.len() {
            let length = self.chain(slot).count();
            if length > 0 {
                occupied_slots += 1;
                longest_chain = longest_chain.max(length);
            }
        }

        TableStats {
            len: self.count,
            bucket_size: self.slots.len(),
            load_factor: self.load_factor(),
            load_limit: self.load_limit,
            occupied_slots,
            longest_chain,
            vacant_nodes: self.nodes.len() - self.count,
            resizes: self.resizes,
        }
    }

    fn entry(&self, idx: usize) -> &Entry<K, V> {
        match &self.nodes[idx] {
            Node::Occupied(entry) => entry,
            Node::Vacant { .. } => unreachable!("chain link {} points at a vacant node", idx),
        }
    }

    fn entry_mut(&mut self, idx: usize) -> &mut Entry<K, V> {
        match &mut self.nodes[idx] {
            Node::Occupied(entry) => entry,
            Node::Vacant { .. } => unreachable!("chain link {} points at a vacant node", idx),
        }
    }

    /// Store `entry` in a vacated node if one exists, else append.
    fn allocate(&mut self, entry: Entry<K, V>) -> usize {
        match self.free_head {
            Some(idx) => {
                self.free_head = match self.nodes[idx] {
                    Node::Vacant { next_free } => next_free,
                    Node::Occupied(_) => unreachable!("free list reaches live node {}", idx),
                };
                self.nodes[idx] = Node::Occupied(entry);
                idx
            }
            None => {
                self.nodes.push(Node::Occupied(entry));
                self.nodes.len() - 1
            }
        }
    }

    /// Vacate node `idx` and push it onto the free list.
    fn release(&mut self, idx: usize) -> Entry<K, V> {
        let vacant = Node::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut self.nodes[idx], vacant) {
            Node::Occupied(entry) => {
                self.free_head = Some(idx);
                entry
            }
            Node::Vacant { .. } => unreachable!("released node {} twice", idx),
        }
    }
}

impl<K, V> Hashtable<K, V>
where
    K: Hash + Eq,
{
    /// Create a table with [`DEFAULT_BUCKET_SIZE`] slots and [`DEFAULT_LOAD_LIMIT`]
    pub fn new() -> Self {
        Self::from_slots(vec![None; DEFAULT_BUCKET_SIZE], DEFAULT_LOAD_LIMIT)
    }

    /// Create a table with `initial_capacity` slots and the default load limit
    pub fn with_capacity(initial_capacity: usize) -> Result<Self> {
        Self::with_config(HashtableConfig::with_capacity(initial_capacity))
    }

    /// Create a table with explicit slot count and load limit
    pub fn with_capacity_and_load_limit(initial_capacity: usize, load_limit: f32) -> Result<Self> {
        Self::with_config(HashtableConfig::with_capacity(initial_capacity).load_limit(load_limit))
    }

    /// Create a table from a validated configuration
    pub fn with_config(config: HashtableConfig) -> Result<Self> {
        config.validate()?;

        let capacity = if config.enforce_prime_capacity {
            next_prime(config.initial_capacity)
                .ok_or_else(|| ChainTableError::capacity_exhausted(config.initial_capacity))?
        } else {
            config.initial_capacity
        };

        let slots = allocate_slots(capacity)?;
        log::trace!(
            "Created hashtable with {} slots, load limit {}",
            capacity,
            config.load_limit
        );
        Ok(Self::from_slots(slots, config.load_limit))
    }

    /// Slot index that `key` hashes to under the current capacity
    pub fn slot_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        fold_hash(hash_key(key), self.slots.len())
    }

    /// Check if a live entry with an equal key exists
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Get reference to value by key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(key).map(|idx| &self.entry(idx).value)
    }

    /// Get mutable reference to value by key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find_index(key)?;
        Some(&mut self.entry_mut(idx).value)
    }

    /// Insert or overwrite. Returns the previous value when the key existed.
    ///
    /// Inserting a new key may first grow the table. If growth fails the
    /// entry is still inserted into the current slots; chains absorb the
    /// extra load and the next insertion retries the growth.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(idx) = self.find_index(&key) {
            return Some(mem::replace(&mut self.entry_mut(idx).value, value));
        }

        if self.exceeds_load_limit() {
            if let Err(e) = self.resize() {
                log::warn!(
                    "Hashtable growth failed at {} slots, inserting without growth: {}",
                    self.slots.len(),
                    e
                );
            }
        }

        let slot = self.slot_of(&key);
        let head = self.slots[slot];
        let idx = self.allocate(Entry {
            key,
            value,
            next: head,
        });
        self.slots[slot] = Some(idx);
        self.count += 1;
        None
    }

    /// Remove key-value pair, returns value if existed.
    ///
    /// A missing key, including one whose slot is empty, is `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key);
        let mut prev: Option<usize> = None;
        let mut link = self.slots[slot];

        while let Some(idx) = link {
            let entry = self.entry(idx);
            let next = entry.next;
            if Borrow::<Q>::borrow(&entry.key) == key {
                match prev {
                    Some(prev_idx) => self.entry_mut(prev_idx).next = next,
                    None => self.slots[slot] = next,
                }
                let removed = self.release(idx);
                self.count -= 1;
                return Some(removed.value);
            }
            prev = Some(idx);
            link = next;
        }
        None
    }

    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut link = self.slots[self.slot_of(key)];
        while let Some(idx) = link {
            let entry = self.entry(idx);
            if Borrow::<Q>::borrow(&entry.key) == key {
                return Some(idx);
            }
            link = entry.next;
        }
        None
    }

    /// Grow to the smallest prime at least twice the current slot count.
    fn resize(&mut self) -> Result<()> {
        let new_capacity = grown_capacity(self.slots.len())?;
        self.resize_to(new_capacity)
    }

    /// Rehash into `new_capacity` slots. On error the table is unchanged.
    fn resize_to(&mut self, new_capacity: usize) -> Result<()> {
        let old_capacity = self.slots.len();
        self.relink(allocate_slots(new_capacity)?);
        self.resizes += 1;

        log::debug!(
            "Resized hashtable from {} to {} slots ({} entries)",
            old_capacity,
            new_capacity,
            self.count
        );
        Ok(())
    }

    /// Thread every live node into `slots`, then adopt them.
    fn relink(&mut self, mut slots: Vec<Option<usize>>) {
        let capacity = slots.len();
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            if let Node::Occupied(entry) = node {
                let slot = fold_hash(hash_key(&entry.key), capacity);
                entry.next = slots[slot];
                slots[slot] = Some(idx);
            }
        }
        self.slots = slots;
    }
}

impl<K, V> Default for Hashtable<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Hashtable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a Hashtable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`Hashtable`]
pub struct Iter<'a, K, V> {
    nodes: std::slice::Iter<'a, Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for node in self.nodes.by_ref() {
            if let Node::Occupied(entry) = node {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of a [`Hashtable`]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the values of a [`Hashtable`]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Mutable iterator over the values of a [`Hashtable`]
pub struct ValuesMut<'a, K, V> {
    nodes: std::slice::IterMut<'a, Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        for node in self.nodes.by_ref() {
            if let Node::Occupied(entry) = node {
                self.remaining -= 1;
                return Some(&mut entry.value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// Iterator over one slot's chain, head first
pub struct Chain<'a, K, V> {
    nodes: &'a [Node<K, V>],
    link: Option<usize>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.link?;
        match &self.nodes[idx] {
            Node::Occupied(entry) => {
                self.link = entry.next;
                Some((&entry.key, &entry.value))
            }
            Node::Vacant { .. } => unreachable!("chain link {} points at a vacant node", idx),
        }
    }
}

impl<K, V> FusedIterator for Chain<'_, K, V> {}
