//! Insertion-order-preserving multi-valued map.

/// A key-value store where the same key may appear multiple times and
/// global insertion order across all keys is retained.
///
/// Backed by a flat pair list, which makes the ordering invariant
/// structural: serialization walks the pairs as they were added. Lookups
/// are linear, which is the right trade for query-string sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMultiDict<K, V> {
    items: Vec<(K, V)>,
}

impl<K, V> Default for OrderedMultiDict<K, V> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K, V> OrderedMultiDict<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every pair, in global insertion order.
    pub fn allitems(&self) -> &[(K, V)] {
        &self.items
    }

    /// Lazy, restartable iteration over every pair in global order.
    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.items.iter()
    }

    /// Resets the store to exactly these pairs, order preserved, duplicate
    /// keys allowed.
    pub fn load(&mut self, items: Vec<(K, V)>) {
        self.items = items;
    }

    /// Appends a pair at the end of global order, keeping any existing
    /// entries for the key.
    pub fn add(&mut self, key: K, value: V) {
        self.items.push((key, value));
    }
}

impl<K: PartialEq + Clone, V> OrderedMultiDict<K, V> {
    /// First value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// All values stored for `key`, in insertion order.
    pub fn get_all(&self, key: &K) -> Vec<&V> {
        self.items.iter().filter(|(k, _)| k == key).map(|(_, v)| v).collect()
    }

    /// Replaces all values of each key in `items` with that key's new
    /// values, placed contiguously at the key's first existing occurrence;
    /// keys not yet present are appended. Untouched keys keep their
    /// positions.
    pub fn updateall(&mut self, items: Vec<(K, V)>) {
        let mut grouped: Vec<(K, Vec<V>)> = Vec::new();
        for (key, value) in items {
            match grouped.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => values.push(value),
                None => grouped.push((key, vec![value])),
            }
        }

        for (key, values) in grouped {
            match self.items.iter().position(|(k, _)| *k == key) {
                Some(first) => {
                    self.items.retain(|(k, _)| *k != key);
                    for (offset, value) in values.into_iter().enumerate() {
                        self.items.insert(first + offset, (key.clone(), value));
                    }
                }
                None => {
                    for value in values {
                        self.items.push((key.clone(), value));
                    }
                }
            }
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMultiDict<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
