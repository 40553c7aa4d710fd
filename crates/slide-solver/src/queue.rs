//! Keyed min-priority queue with lazy deletion.
//!
//! `BinaryHeap` cannot lower the priority of an element already inside it.
//! Instead, offering a better entry for a key tombstones the old one in place
//! and pushes the new one; tombstoned entries are dropped when they surface.
//! At most one live entry exists per key.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// Outcome of [`IndexedQueue::offer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// No live entry existed for the key
    Inserted,
    /// A live entry with a worse priority was tombstoned
    Superseded,
    /// A live entry with an equal or better priority already exists
    Rejected,
}

/// Heap handle. Ties on priority pop in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Ticket<P> {
    priority: P,
    seq: usize,
}

#[derive(Debug)]
struct Slot<K, T> {
    key: K,
    item: T,
    removed: bool,
}

#[derive(Debug)]
pub struct IndexedQueue<K, P, T> {
    heap: BinaryHeap<Reverse<Ticket<P>>>,
    /// Indexed by ticket sequence number; emptied once popped
    slots: Vec<Option<Slot<K, T>>>,
    /// Key -> (priority, seq) of its live entry
    live: HashMap<K, (P, usize)>,
    tombstones: usize,
    skipped: usize,
}

impl<K, P, T> IndexedQueue<K, P, T>
where
    K: Hash + Eq + Clone,
    P: Ord + Copy,
{
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            slots: Vec::new(),
            live: HashMap::new(),
            tombstones: 0,
            skipped: 0,
        }
    }

    /// Queue `item` under `key` unless an entry at least as good is live.
    pub fn offer(&mut self, key: K, priority: P, item: T) -> Admission {
        let seq = self.slots.len();
        let admission = match self.live.entry(key.clone()) {
            Entry::Occupied(mut live) => {
                let (current, old_seq) = *live.get();
                if current <= priority {
                    return Admission::Rejected;
                }
                if let Some(slot) = self.slots[old_seq].as_mut() {
                    slot.removed = true;
                }
                self.tombstones += 1;
                live.insert((priority, seq));
                Admission::Superseded
            }
            Entry::Vacant(vacant) => {
                vacant.insert((priority, seq));
                Admission::Inserted
            }
        };

        self.slots.push(Some(Slot {
            key,
            item,
            removed: false,
        }));
        self.heap.push(Reverse(Ticket { priority, seq }));
        admission
    }

    /// Remove and return the live entry with the lowest priority.
    pub fn pop(&mut self) -> Option<(K, P, T)> {
        while let Some(Reverse(ticket)) = self.heap.pop() {
            let Some(slot) = self.slots[ticket.seq].take() else {
                continue;
            };
            if slot.removed {
                self.tombstones -= 1;
                self.skipped += 1;
                continue;
            }
            self.live.remove(&slot.key);
            return Some((slot.key, ticket.priority, slot.item));
        }
        None
    }

    /// Priority of the live entry for `key`
    pub fn priority(&self, key: &K) -> Option<P> {
        self.live.get(key).map(|&(priority, _)| priority)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Live entries
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Superseded entries still sitting in the heap
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Tombstoned entries discarded by `pop` so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<K, P, T> Default for IndexedQueue<K, P, T>
where
    K: Hash + Eq + Clone,
    P: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
