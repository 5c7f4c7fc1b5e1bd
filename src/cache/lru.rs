//! LRU Map Module
//!
//! Bounded map with least-recently-used eviction.

use std::collections::HashMap;
use std::hash::Hash;

// == Node ==
#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    /// Neighbour towards the most recently used end
    prev: Option<usize>,
    /// Neighbour towards the least recently used end
    next: Option<usize>,
}

// == LRU Map ==
/// Fixed-capacity map that evicts the least recently used entry.
///
/// Nodes live in a dense `Vec` and are linked by index into a recency list:
/// - `head` = most recently used
/// - `tail` = least recently used
///
/// Lookup, touch, insert, remove and eviction are all O(1) on average.
#[derive(Debug)]
pub struct LruMap<K, V> {
    index: HashMap<K, usize>,
    nodes: Vec<Node<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> LruMap<K, V> {
    // == Constructor ==
    /// Creates an empty map holding at most `capacity` entries.
    ///
    /// A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks membership without touching recency.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Get ==
    /// Returns the value and marks the key as most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.touch(idx);
        Some(&self.nodes[idx].value)
    }

    // == Insert ==
    /// Inserts or replaces a value, marking the key as most recently used.
    ///
    /// Returns the evicted entry when a new key pushed the map over capacity.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.index.get(&key) {
            self.nodes[idx].value = value;
            self.touch(idx);
            return None;
        }

        let evicted = if self.nodes.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let idx = self.nodes.len();
        self.nodes.push(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.index.insert(key, idx);
        self.attach_front(idx);

        evicted
    }

    // == Remove ==
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = *self.index.get(key)?;
        Some(self.remove_at(idx).1)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        Some(self.remove_at(idx))
    }

    /// Drops every entry for which `keep` returns false.
    ///
    /// Returns the number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<K> = self
            .nodes
            .iter()
            .filter(|node| !keep(&node.key, &node.value))
            .map(|node| node.key.clone())
            .collect();

        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            cursor: self.head,
        }
    }

    // == Recency List Plumbing ==
    fn touch(&mut self, idx: usize) {
        if self.head != Some(idx) {
            self.detach(idx);
            self.attach_front(idx);
        }
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        self.nodes[idx].prev = None;
        self.nodes[idx].next = old_head;
        match old_head {
            Some(h) => self.nodes[h].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Unlinks the node at `idx` and swap-removes it from the dense storage,
    /// re-pointing whoever referenced the node moved into its slot.
    fn remove_at(&mut self, idx: usize) -> (K, V) {
        self.detach(idx);
        let last = self.nodes.len() - 1;
        let node = self.nodes.swap_remove(idx);
        self.index.remove(&node.key);

        if idx != last {
            let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
            match prev {
                Some(p) => self.nodes[p].next = Some(idx),
                None => self.head = Some(idx),
            }
            match next {
                Some(n) => self.nodes[n].prev = Some(idx),
                None => self.tail = Some(idx),
            }
            if let Some(slot) = self.index.get_mut(&self.nodes[idx].key) {
                *slot = idx;
            }
        }

        (node.key, node.value)
    }
}

// == Iterator ==
/// Recency-ordered iterator over an [`LruMap`].
pub struct Iter<'a, K, V> {
    map: &'a LruMap<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.map.nodes[idx];
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(map: &LruMap<&'static str, u32>) -> Vec<&'static str> {
        map.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_lru_new() {
        let lru: LruMap<&str, u32> = LruMap::new(3);
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.capacity(), 3);
    }

    #[test]
    fn test_lru_zero_capacity_clamped() {
        let mut lru = LruMap::new(0);
        assert_eq!(lru.capacity(), 1);
        lru.insert("a", 1);
        assert_eq!(lru.insert("b", 2), Some(("a", 1)));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_insert_orders_by_recency() {
        let mut lru = LruMap::new(3);
        lru.insert("key1", 1);
        lru.insert("key2", 2);
        lru.insert("key3", 3);

        assert_eq!(lru.len(), 3);
        assert_eq!(keys(&lru), vec!["key3", "key2", "key1"]);
    }

    #[test]
    fn test_lru_get_moves_to_front() {
        let mut lru = LruMap::new(3);
        lru.insert("a", 1);
        lru.insert("b", 2);
        lru.insert("c", 3);

        assert_eq!(lru.get(&"a"), Some(&1));
        assert_eq!(keys(&lru), vec!["a", "c", "b"]);

        assert_eq!(lru.pop_lru(), Some(("b", 2)));
        assert_eq!(lru.pop_lru(), Some(("c", 3)));
        assert_eq!(lru.pop_lru(), Some(("a", 1)));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_contains_does_not_touch() {
        let mut lru = LruMap::new(2);
        lru.insert("a", 1);
        lru.insert("b", 2);

        assert!(lru.contains(&"a"));
        assert_eq!(lru.insert("c", 3), Some(("a", 1)));
    }

    #[test]
    fn test_lru_insert_over_capacity_evicts_oldest() {
        let mut lru = LruMap::new(2);
        assert_eq!(lru.insert(1, "one"), None);
        assert_eq!(lru.insert(2, "two"), None);
        assert_eq!(lru.insert(3, "three"), Some((1, "one")));

        assert!(!lru.contains(&1));
        assert!(lru.contains(&2));
        assert!(lru.contains(&3));
    }

    #[test]
    fn test_lru_replace_existing_key() {
        let mut lru = LruMap::new(2);
        lru.insert("a", 1);
        lru.insert("b", 2);

        // Replacing refreshes recency and never evicts
        assert_eq!(lru.insert("a", 10), None);
        assert_eq!(lru.len(), 2);
        assert_eq!(keys(&lru), vec!["a", "b"]);
        assert_eq!(lru.get(&"a"), Some(&10));
    }

    #[test]
    fn test_lru_remove_middle_keeps_links() {
        let mut lru = LruMap::new(4);
        lru.insert("a", 1);
        lru.insert("b", 2);
        lru.insert("c", 3);
        lru.insert("d", 4);

        assert_eq!(lru.remove(&"b"), Some(2));
        assert_eq!(keys(&lru), vec!["d", "c", "a"]);

        // Slot reuse after swap-remove must keep the index consistent
        lru.insert("e", 5);
        assert_eq!(lru.get(&"a"), Some(&1));
        assert_eq!(keys(&lru), vec!["a", "e", "d", "c"]);
        assert_eq!(lru.pop_lru(), Some(("c", 3)));
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = LruMap::new(2);
        lru.insert("key1", 1);

        assert_eq!(lru.remove(&"nonexistent"), None);
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_pop_empty() {
        let mut lru: LruMap<u32, u32> = LruMap::new(2);
        assert_eq!(lru.pop_lru(), None);
        assert!(lru.iter().next().is_none());
    }

    #[test]
    fn test_lru_retain() {
        let mut lru = LruMap::new(5);
        for i in 0..5 {
            lru.insert(i, i * 10);
        }

        let removed = lru.retain(|k, _| k % 2 == 0);
        assert_eq!(removed, 2);
        assert_eq!(lru.len(), 3);
        let order: Vec<i32> = lru.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec![4, 2, 0]);
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruMap::new(3);
        lru.insert("a", 1);
        lru.insert("b", 2);
        lru.clear();

        assert!(lru.is_empty());
        assert_eq!(lru.pop_lru(), None);
        lru.insert("c", 3);
        assert_eq!(keys(&lru), vec!["c"]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruMap::new(3);
        lru.insert("a", 1);
        lru.insert("b", 2);
        lru.insert("c", 3);

        lru.get(&"a");
        lru.get(&"c");
        lru.get(&"b");

        // front=[b, c, a]=back
        assert_eq!(lru.pop_lru(), Some(("a", 1)));
        assert_eq!(lru.pop_lru(), Some(("c", 3)));
        assert_eq!(lru.pop_lru(), Some(("b", 2)));
    }
}
