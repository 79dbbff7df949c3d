//! Binary min-heap with identity deduplication.
//!
//! Each key appears in the heap at most once. [`MinQueue::enqueue`] ignores
//! keys that are already queued, whatever their priority;
//! [`MinQueue::decrease`] repositions a queued key when a strictly better
//! priority arrives. Searches use [`MinQueue::push_or_decrease`] so that a
//! cheaper route found after a node was queued is never lost.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug)]
struct Entry<K> {
    key: K,
    priority: i32,
}

/// A min-priority queue keyed by identity.
///
/// Ties between equal priorities are broken by heap layout; callers must
/// treat equal-priority keys as interchangeable.
#[derive(Debug, Clone)]
pub struct MinQueue<K> {
    heap: Vec<Entry<K>>,
    slots: HashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> MinQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Queue `key` at `priority`. Returns `false` (and changes nothing) if
    /// the key is already queued.
    pub fn enqueue(&mut self, key: K, priority: i32) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        let i = self.heap.len();
        self.heap.push(Entry { key, priority });
        self.slots.insert(key, i);
        self.sift_up(i);
        true
    }

    /// Lower the priority of a queued key. Returns `true` if the key was
    /// queued with a strictly larger priority.
    pub fn decrease(&mut self, key: K, priority: i32) -> bool {
        let Some(&i) = self.slots.get(&key) else {
            return false;
        };
        if priority >= self.heap[i].priority {
            return false;
        }
        self.heap[i].priority = priority;
        self.sift_up(i);
        true
    }

    /// Queue `key`, or lower its priority if it is already queued with a
    /// worse one. Returns `true` if the queue changed.
    pub fn push_or_decrease(&mut self, key: K, priority: i32) -> bool {
        self.enqueue(key, priority) || self.decrease(key, priority)
    }

    /// Remove and return the entry with the smallest priority.
    pub fn dequeue(&mut self) -> Option<(K, i32)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let min = self.heap.pop()?;
        self.slots.remove(&min.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((min.key, min.priority))
    }

    /// The smallest entry without removing it.
    pub fn peek(&self) -> Option<(K, i32)> {
        self.heap.first().map(|e| (e.key, e.priority))
    }

    /// Current priority of a queued key.
    pub fn priority(&self, key: &K) -> Option<i32> {
        self.slots.get(key).map(|&i| self.heap[i].priority)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry. Capacity is kept for the next run.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].key, a);
        self.slots.insert(self.heap[b].key, b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[parent].priority <= self.heap[i].priority {
                break;
            }
            self.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<K: Copy + Eq + Hash> Default for MinQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
