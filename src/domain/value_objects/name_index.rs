use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered map keyed by monitor name.
///
/// Inserting a key that is already present overwrites its value but keeps the
/// position of the first insertion, so duplicate names collapse with
/// last-write-wins semantics while iteration order stays stable.
#[derive(Debug, Clone)]
pub struct NameIndex<K, V> {
    entries: Vec<(K, V)>,
    positions: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone, V> NameIndex<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Inserts or overwrites `key`. Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&pos) = self.positions.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<K: Eq + Hash + Clone, V> Default for NameIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for NameIndex<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (k, v) in iter {
            index.insert(k, v);
        }
        index
    }
}
