use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::{StoreError, StoreResult};
use crate::traits::Record;

/// Immutable lookup table from a record's key to the record.
///
/// Records are kept in decode order next to a key index. Lookups by key are
/// hashed; lookups by name or predicate scan in decode order and return the
/// **first** match. That tie-break is part of the contract: when a dataset
/// carries two records with the same name, `by_name` always resolves to the
/// one that appeared first in the source document.
pub struct KeyedStore<K, V> {
    records: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> KeyedStore<K, V>
where
    K: Clone + Eq + Hash + Display,
    V: Record<Key = K>,
{
    /// Build a store from records in decode order.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if two records share a key.
    pub fn build(records: impl IntoIterator<Item = V>) -> StoreResult<Self> {
        let records: Vec<V> = records.into_iter().collect();
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if let Some(&existing) = index.get(record.key()) {
                let first: &V = &records[existing];
                return Err(StoreError::DuplicateKey {
                    key: record.key().to_string(),
                    first: first.name().to_string(),
                    second: record.name().to_string(),
                });
            }
            index.insert(record.key().clone(), pos);
        }
        Ok(Self { records, index })
    }

    /// Exact lookup by key.
    pub fn by_id(&self, key: &K) -> StoreResult<&V> {
        self.get(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))
    }

    /// First record (in decode order) whose name equals `name`.
    pub fn by_name(&self, name: &str) -> StoreResult<&V> {
        self.records
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| StoreError::KeyNotFound(format!("name '{name}'")))
    }

    /// First record (in decode order) for which `predicate` holds.
    pub fn find<P>(&self, predicate: P) -> StoreResult<&V>
    where
        P: Fn(&V) -> bool,
    {
        self.records
            .iter()
            .find(|r| predicate(r))
            .ok_or_else(|| StoreError::KeyNotFound("no record matches predicate".into()))
    }

    /// Exact lookup by key, without an error.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&pos| &self.records[pos])
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }
}

impl<K, V> KeyedStore<K, V> {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in decode order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.records.iter()
    }

    /// Keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }
}

impl<K, V> Default for KeyedStore<K, V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a KeyedStore<K, V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<K, V> std::fmt::Debug for KeyedStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedStore")
            .field("record_count", &self.records.len())
            .finish()
    }
}
