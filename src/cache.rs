//! Capacity-bounded in-memory cache behind a selectable eviction policy.
//!
//! The site previously kept avatar URLs in a module-level map that threw out
//! the oldest insertion once full. That behavior survives as
//! [`EvictionPolicy::Fifo`]; new call sites should prefer [`EvictionPolicy::Lru`].

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Evict the least-recently-inserted entry, ignoring reads.
    Fifo,
    /// Evict the least-recently-used entry; reads refresh recency.
    Lru,
}

#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    policy: EvictionPolicy,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            capacity: capacity.max(1),
            policy,
            entries: HashMap::with_capacity(capacity.max(1)),
            order: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.entries.contains_key(key) {
            return None;
        }

        if self.policy == EvictionPolicy::Lru {
            self.refresh(key);
        }

        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), value);
            if self.policy == EvictionPolicy::Lru {
                self.refresh(&key);
            }
            return;
        }

        if self.entries.len() >= self.capacity
            && let Some(evicted) = self.order.pop_front()
        {
            self.entries.remove(&evicted);
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Moves `key` to the most-recent end of the recency queue.
    fn refresh(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.clone());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hit_returns_inserted_value() {
        let mut cache = BoundedCache::new(4, EvictionPolicy::Lru);
        cache.insert("mika", "url-a");

        assert_eq!(cache.get(&"mika"), Some(&"url-a"));
        assert_eq!(cache.get(&"nobody"), None);
    }

    #[test]
    fn test_fifo_evicts_oldest_insertion_despite_reads() {
        let mut cache = BoundedCache::new(3, EvictionPolicy::Fifo);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);

        // a read does not save the oldest entry under fifo
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.insert("d", 4);

        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"d"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_lru_read_refreshes_recency() {
        let mut cache = BoundedCache::new(3, EvictionPolicy::Lru);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);

        assert_eq!(cache.get(&"a"), Some(&1));
        cache.insert("d", 4);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn test_replacing_a_key_does_not_grow_or_evict() {
        let mut cache = BoundedCache::new(2, EvictionPolicy::Fifo);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&10));
        assert!(cache.contains(&"b"));
    }

    #[test]
    fn test_clear_empties_both_map_and_queue() {
        let mut cache = BoundedCache::new(2, EvictionPolicy::Lru);
        cache.insert("a", 1);
        cache.clear();

        assert!(cache.is_empty());
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.insert("d", 4);
        assert_eq!(cache.len(), 2);
    }
}
