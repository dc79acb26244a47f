//! Injective key/value map with O(1) lookup in both directions.
//!
//! Two hash maps kept in lock-step. Every mutation goes through this type so the
//! forward and inverse views can never disagree: a key is bound to at most one value
//! and a value to at most one key.

use std::collections::HashMap;
use std::hash::Hash;

/// A binding that blocked an insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict<K, V> {
    /// The key is already bound to this value.
    Key(V),
    /// The value is already bound to this key.
    Value(K),
}

/// Bidirectional map.
#[derive(Debug, Clone)]
pub struct BiMap<K, V> {
    forward: HashMap<K, V>,
    inverse: HashMap<V, K>,
}

impl<K, V> Default for BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            inverse: HashMap::new(),
        }
    }

    /// Create an empty map with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: HashMap::with_capacity(capacity),
            inverse: HashMap::with_capacity(capacity),
        }
    }

    /// Bind `key` to `value` unless either side is already bound.
    ///
    /// Re-inserting an existing pair is a no-op that succeeds. On conflict the map is
    /// left untouched and the existing binding is returned.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), Conflict<K, V>> {
        match (self.forward.get(&key), self.inverse.get(&value)) {
            (Some(v), Some(_)) if *v == value => Ok(()),
            (Some(v), _) => Err(Conflict::Key(v.clone())),
            (None, Some(k)) => Err(Conflict::Value(k.clone())),
            (None, None) => {
                self.forward.insert(key.clone(), value.clone());
                self.inverse.insert(value, key);
                Ok(())
            }
        }
    }

    /// Bind `key` to `value`, first removing any pair that uses either of them.
    ///
    /// Returns the displaced pairs (at most two).
    pub fn insert_or_replace(&mut self, key: K, value: V) -> Vec<(K, V)> {
        let mut displaced = Vec::new();
        if let Some(old) = self.remove(&key) {
            displaced.push((key.clone(), old));
        }
        if let Some(old) = self.remove_by_value(&value) {
            displaced.push((old, value.clone()));
        }
        self.forward.insert(key.clone(), value.clone());
        self.inverse.insert(value, key);
        displaced
    }

    /// Value bound to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Key bound to `value`.
    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.inverse.get(value)
    }

    /// Whether `key` is bound.
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Whether `value` is bound.
    pub fn contains_value(&self, value: &V) -> bool {
        self.inverse.contains_key(value)
    }

    /// Unbind `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.forward.remove(key)?;
        self.inverse.remove(&value);
        Some(value)
    }

    /// Unbind `value`, returning its key.
    pub fn remove_by_value(&mut self, value: &V) -> Option<K> {
        let key = self.inverse.remove(value)?;
        self.forward.remove(&key);
        Some(key)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }

    /// Iterate over keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.forward.keys()
    }

    /// Iterate over values in arbitrary order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inverse.keys()
    }
}

impl<K, V> FromIterator<(K, V)> for BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Collect pairs, keeping the first binding on any conflict.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BiMap::new();
        for (k, v) in iter {
            let _ = map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_and_lookup_both_ways() {
        let mut map = BiMap::new();
        map.insert(0x41u32, 'A').unwrap();
        map.insert(0x42u32, 'B').unwrap();
        assert_eq!(map.get(&0x41), Some(&'A'));
        assert_eq!(map.get_by_value(&'B'), Some(&0x42));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_insert_rejects_collisions() {
        let mut map = BiMap::new();
        map.insert(1u32, 'x').unwrap();
        assert_eq!(map.insert(1, 'y'), Err(Conflict::Key('x')));
        assert_eq!(map.insert(2, 'x'), Err(Conflict::Value(1)));
        // Same pair again is fine
        assert_eq!(map.insert(1, 'x'), Ok(()));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_value(&'y'));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_insert_or_replace_displaces_both_sides() {
        let mut map = BiMap::new();
        map.insert(1u32, 'a').unwrap();
        map.insert(2u32, 'b').unwrap();
        let displaced = map.insert_or_replace(1, 'b');
        assert_eq!(displaced, vec![(1, 'a'), (2, 'b')]);
        assert_eq!(map.get(&1), Some(&'b'));
        assert_eq!(map.get(&2), None);
        assert_eq!(map.get_by_value(&'a'), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_keeps_views_in_sync() {
        let mut map: BiMap<u32, char> = [(1, 'a'), (2, 'b')].into_iter().collect();
        assert_eq!(map.remove(&1), Some('a'));
        assert!(!map.contains_value(&'a'));
        assert_eq!(map.remove_by_value(&'b'), Some(2));
        assert!(map.is_empty());
    }

    proptest! {
        #[test]
        fn prop_always_injective(pairs in proptest::collection::vec((0u16..64, 0u16..64), 0..200)) {
            let mut map = BiMap::new();
            for (k, v) in pairs {
                let _ = map.insert(k, v);
            }
            for (k, v) in map.iter() {
                prop_assert_eq!(map.get_by_value(v), Some(k));
            }
            prop_assert_eq!(map.keys().count(), map.values().count());
        }
    }
}
