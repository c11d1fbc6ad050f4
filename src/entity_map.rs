/*!

`EntityMap<K, T>`: an unordered mapping from an opaque key to an entity.

Each key maps to at most one entity. Absence of a key is the normal "not
found" state and is reported as `None` by every read; only the one-argument
[`EntityMap::remove`] treats a missing key as an error, mirroring the removal
policy of [`EntityVec`](crate::EntityVec).

Backed by the deterministic hash map from [`crate::hashing`], so iteration
order is reproducible between runs. No ordering is guaranteed relative to
insertion, but the `keys`/`values`/`iter` views of an unmutated map correspond
index-for-index.

*/

use std::collections::hash_map::Entry;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::mem;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::EntityError;
use crate::hashing::{HashMap, HashMapExt};

/// An unordered key-to-entity mapping, one entity per key.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap<K: Eq + Hash, T> {
    entities: HashMap<K, T>,
}

impl<K: Eq + Hash, T> EntityMap<K, T> {
    /// Creates an empty `EntityMap`.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    /// Creates with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: HashMap::with_capacity(capacity),
        }
    }

    /// Current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Unconditional upsert. Returns the previously mapped entity, if any.
    pub fn insert(&mut self, key: K, entity: T) -> Option<T> {
        self.entities.insert(key, entity)
    }

    /// Inserts every `(key, entity)` pair produced by `iter`.
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, T)>,
    {
        self.entities.extend(iter);
    }

    /// Inserts only if `key` is not already mapped. Returns the existing
    /// entity when the insert is rejected (`entity` is dropped), `None` when
    /// the insert happened.
    pub fn insert_if_absent(&mut self, key: K, entity: T) -> Option<&T> {
        match self.entities.entry(key) {
            Entry::Occupied(occupied) => Some(&*occupied.into_mut()),
            Entry::Vacant(vacant) => {
                vacant.insert(entity);
                None
            }
        }
    }

    /// Replaces the entity for `key` only if the key is already mapped.
    /// Returns the previous entity, or `None` (with `entity` dropped) when
    /// the key is absent.
    pub fn replace(&mut self, key: &K, entity: T) -> Option<T> {
        self.entities
            .get_mut(key)
            .map(|slot| mem::replace(slot, entity))
    }

    /// Returns the entity for `key`, or `None`. Absence is routine, never an
    /// error.
    pub fn get(&self, key: &K) -> Option<&T> {
        self.entities.get(key)
    }

    /// Mutable variant of [`EntityMap::get`].
    pub fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        self.entities.get_mut(key)
    }

    /// Returns the entity for `key`, or `default` when the key is absent.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a T) -> &'a T {
        self.entities.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entities.contains_key(key)
    }

    /// Returns `true` if some key maps to an equal entity. O(len).
    pub fn contains_value(&self, entity: &T) -> bool
    where
        T: PartialEq,
    {
        self.entities.values().any(|candidate| candidate == entity)
    }

    /// Removes and returns the entity for `key`.
    ///
    /// # Errors
    /// `EntityError::NotFound` when the key is absent. This is the one keyed
    /// operation that treats absence as failure; use
    /// [`EntityMap::remove_if_equal`] for a non-erroring conditional removal.
    pub fn remove(&mut self, key: &K) -> Result<T, EntityError>
    where
        K: Debug,
    {
        self.entities
            .remove(key)
            .ok_or_else(|| EntityError::NotFound(format!("no entity for key {key:?}")))
    }

    /// Removes the entry only if `key` is currently mapped to an entity equal
    /// to `expected`. Returns whether an entry was removed; never errors.
    pub fn remove_if_equal(&mut self, key: &K, expected: &T) -> bool
    where
        T: PartialEq,
    {
        if self
            .entities
            .get(key)
            .is_some_and(|entity| entity == expected)
        {
            self.entities.remove(key);
            true
        } else {
            false
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        trace!("clearing {} entities", self.entities.len());
        self.entities.clear();
    }

    /// View of the keys. Consistent with [`EntityMap::values`] while the map
    /// is not mutated in between.
    pub fn keys(&self) -> std::collections::hash_map::Keys<'_, K, T> {
        self.entities.keys()
    }

    /// View of the entities.
    pub fn values(&self) -> std::collections::hash_map::Values<'_, K, T> {
        self.entities.values()
    }

    /// Mutable view of the entities.
    pub fn values_mut(&mut self) -> std::collections::hash_map::ValuesMut<'_, K, T> {
        self.entities.values_mut()
    }

    /// View of the `(key, entity)` pairs.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, T> {
        self.entities.iter()
    }

    /// Mutable view of the `(key, entity)` pairs.
    pub fn iter_mut(&mut self) -> std::collections::hash_map::IterMut<'_, K, T> {
        self.entities.iter_mut()
    }

    /// Returns a **snapshot** `Vec<T>` by cloning all entities.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entities.values().cloned().collect()
    }

    /// Returns the entity for `key` if present; otherwise invokes
    /// `produce(&key)` and, on `Some`, stores and returns the produced entity.
    pub fn compute_if_absent<F>(&mut self, key: K, produce: F) -> Option<&T>
    where
        F: FnOnce(&K) -> Option<T>,
    {
        match self.entities.entry(key) {
            Entry::Occupied(occupied) => Some(&*occupied.into_mut()),
            Entry::Vacant(vacant) => {
                let entity = produce(vacant.key())?;
                Some(&*vacant.insert(entity))
            }
        }
    }

    /// If `key` is mapped, recomputes its entity: a `Some` result replaces it
    /// and is returned, a `None` result removes the key. An absent key
    /// returns `None` without invoking `remap`.
    pub fn compute_if_present<F>(&mut self, key: K, remap: F) -> Option<&T>
    where
        F: FnOnce(&K, &T) -> Option<T>,
    {
        match self.entities.entry(key) {
            Entry::Occupied(mut occupied) => match remap(occupied.key(), occupied.get()) {
                Some(entity) => {
                    occupied.insert(entity);
                    Some(&*occupied.into_mut())
                }
                None => {
                    occupied.remove();
                    None
                }
            },
            Entry::Vacant(_) => None,
        }
    }

    /// Always invokes `remap` with the current entity for `key`, or `None`
    /// when absent. A `Some` result is stored and returned; a `None` result
    /// removes the key.
    pub fn compute<F>(&mut self, key: K, remap: F) -> Option<&T>
    where
        F: FnOnce(&K, Option<&T>) -> Option<T>,
    {
        match self.entities.entry(key) {
            Entry::Occupied(mut occupied) => match remap(occupied.key(), Some(occupied.get())) {
                Some(entity) => {
                    occupied.insert(entity);
                    Some(&*occupied.into_mut())
                }
                None => {
                    occupied.remove();
                    None
                }
            },
            Entry::Vacant(vacant) => {
                let entity = remap(vacant.key(), None)?;
                Some(&*vacant.insert(entity))
            }
        }
    }

    /// If `key` is absent, stores `value` directly without invoking `remap`.
    /// Otherwise stores `remap(existing, value)`, removing the key when that
    /// result is `None`.
    pub fn merge<F>(&mut self, key: K, value: T, remap: F) -> Option<&T>
    where
        F: FnOnce(&T, T) -> Option<T>,
    {
        match self.entities.entry(key) {
            Entry::Occupied(mut occupied) => match remap(occupied.get(), value) {
                Some(entity) => {
                    occupied.insert(entity);
                    Some(&*occupied.into_mut())
                }
                None => {
                    occupied.remove();
                    None
                }
            },
            Entry::Vacant(vacant) => Some(&*vacant.insert(value)),
        }
    }
}

impl<T: Entity> EntityMap<T::Id, T> {
    /// Upserts `entity` keyed by its own identifier. Returns the previously
    /// mapped entity, if any.
    pub fn insert_by_id(&mut self, entity: T) -> Option<T> {
        self.entities.insert(entity.id(), entity)
    }
}

impl<K: Eq + Hash, T> Default for EntityMap<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Debug, T: Debug> Debug for EntityMap<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entities.fmt(f)
    }
}

impl<K: Eq + Hash, T: PartialEq> PartialEq for EntityMap<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl<K: Eq + Hash, T: Eq> Eq for EntityMap<K, T> {}

impl<K: Eq + Hash, T> Extend<(K, T)> for EntityMap<K, T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        self.entities.extend(iter);
    }
}

impl<K: Eq + Hash, T> FromIterator<(K, T)> for EntityMap<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            entities: HashMap::from_iter(iter),
        }
    }
}

impl<K: Eq + Hash, T> IntoIterator for EntityMap<K, T> {
    type Item = (K, T);
    type IntoIter = std::collections::hash_map::IntoIter<K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, K: Eq + Hash, T> IntoIterator for &'a EntityMap<K, T> {
    type Item = (&'a K, &'a T);
    type IntoIter = std::collections::hash_map::Iter<'a, K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl<'a, K: Eq + Hash, T> IntoIterator for &'a mut EntityMap<K, T> {
    type Item = (&'a K, &'a mut T);
    type IntoIter = std::collections::hash_map::IterMut<'a, K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter_mut()
    }
}
