/*!

`EntityVec<T>`: an order-preserving, index-addressable sequence of entities.

Key properties:
- Insertion order is significant and duplicates are permitted.
- Positions are zero-based; `0 <= index < len` is the valid range.
- Reads are permissive: [`EntityVec::get`] and [`EntityVec::find_by_id`]
  report absence as `None`. Mutations are strict: [`EntityVec::set`] and
  [`EntityVec::slice`] fail on an invalid position, and the `remove` family
  fails when its target does not exist.
- You can convert to and from a `Vec<T>` at zero cost.

The `compute`/`merge` family mirrors map-style recomputation with the index in
place of a key. One quirk of that family is kept as documented behavior: when
the index is out of range, a produced value is **appended** at the tail, not
inserted at the requested position.

*/

use std::fmt::{self, Debug};
use std::mem;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::EntityError;

/// An order-preserving sequence of entities addressed by zero-based index.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityVec<T: Entity> {
    entities: Vec<T>,
}

impl<T: Entity> EntityVec<T> {
    /// Creates an empty `EntityVec`.
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Creates with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Current number of entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the sequence has no entities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Appends an entity at the end.
    pub fn push(&mut self, entity: T) {
        self.entities.push(entity);
    }

    /// Appends every entity produced by `iter`, preserving its order.
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.entities.extend(iter);
    }

    /// Replaces the entity at `index`, returning the previous one.
    ///
    /// # Errors
    /// `EntityError::IndexOutOfBounds` if `index >= len`.
    pub fn set(&mut self, index: usize, entity: T) -> Result<T, EntityError> {
        let len = self.entities.len();
        match self.entities.get_mut(index) {
            Some(slot) => Ok(mem::replace(slot, entity)),
            None => Err(EntityError::IndexOutOfBounds { index, len }),
        }
    }

    /// Replaces every entity with the result of applying `f` to it, in index
    /// order. The length never changes.
    pub fn replace_all<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> T,
    {
        for slot in &mut self.entities {
            *slot = f(slot);
        }
    }

    /// Returns the first entity (lowest index) whose identifier equals `id`,
    /// scanning in index order. Absence is normal, not an error.
    pub fn find_by_id(&self, id: &T::Id) -> Option<&T> {
        self.entities.iter().find(|entity| entity.id() == *id)
    }

    /// Mutable variant of [`EntityVec::find_by_id`].
    pub fn find_by_id_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.entities.iter_mut().find(|entity| entity.id() == *id)
    }

    /// Projects the identifiers of all entities, in index order. Duplicates
    /// are preserved; this is a projection, not a set.
    pub fn ids(&self) -> Vec<T::Id> {
        self.entities.iter().map(Entity::id).collect()
    }

    /// Returns the entity at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entities.get(index)
    }

    /// Mutable variant of [`EntityVec::get`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entities.get_mut(index)
    }

    /// Returns the sub-sequence `[start, end)` as a slice.
    ///
    /// # Errors
    /// `EntityError::RangeOutOfBounds` if `start > end` or `end > len`. Range
    /// validity is strict here, unlike the permissive [`EntityVec::get`].
    pub fn slice(&self, start: usize, end: usize) -> Result<&[T], EntityError> {
        let len = self.entities.len();
        if start > end || end > len {
            return Err(EntityError::RangeOutOfBounds { start, end, len });
        }
        Ok(&self.entities[start..end])
    }

    /// Returns `true` if an equal entity is present. O(len).
    pub fn contains(&self, entity: &T) -> bool
    where
        T: PartialEq,
    {
        self.entities.contains(entity)
    }

    /// Position of the first equal entity, or `None`.
    pub fn index_of(&self, entity: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.entities.iter().position(|candidate| candidate == entity)
    }

    /// Position of the last equal entity, or `None`.
    pub fn last_index_of(&self, entity: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.entities.iter().rposition(|candidate| candidate == entity)
    }

    /// Returns a **snapshot** `Vec<T>` by cloning all entities.
    ///
    /// Use `From<EntityVec<T>> for Vec<T>` for a zero-cost conversion if you
    /// don't want to clone.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entities.clone()
    }

    /// Removes and returns the first equal occurrence of `entity`.
    ///
    /// # Errors
    /// `EntityError::NotFound` if no equal entity exists; the sequence is
    /// unchanged in that case.
    pub fn remove(&mut self, entity: &T) -> Result<T, EntityError>
    where
        T: PartialEq + Debug,
    {
        match self.index_of(entity) {
            Some(index) => Ok(self.entities.remove(index)),
            None => Err(EntityError::NotFound(format!(
                "entity not found: {entity:?}"
            ))),
        }
    }

    /// Removes and returns the entity at `index`.
    ///
    /// # Errors
    /// `EntityError::NotFound` (not an index error) when `index` is out of
    /// range: there is no entity at that position to remove.
    pub fn remove_at(&mut self, index: usize) -> Result<T, EntityError> {
        if index < self.entities.len() {
            Ok(self.entities.remove(index))
        } else {
            Err(EntityError::NotFound(format!(
                "no entity at index {index}"
            )))
        }
    }

    /// Removes every entity equal to a member of `others`. Returns whether
    /// the sequence changed.
    pub fn remove_all(&mut self, others: &[T]) -> bool
    where
        T: PartialEq,
    {
        let before = self.entities.len();
        self.entities.retain(|entity| !others.contains(entity));
        let removed = before - self.entities.len();
        if removed > 0 {
            trace!("removed {removed} entities in bulk");
        }
        removed > 0
    }

    /// Retains only entities equal to a member of `others`. Returns whether
    /// the sequence changed.
    pub fn retain_all(&mut self, others: &[T]) -> bool
    where
        T: PartialEq,
    {
        let before = self.entities.len();
        self.entities.retain(|entity| others.contains(entity));
        let removed = before - self.entities.len();
        if removed > 0 {
            trace!("retained {} of {before} entities", self.entities.len());
        }
        removed > 0
    }

    /// Removes all entities.
    pub fn clear(&mut self) {
        trace!("clearing {} entities", self.entities.len());
        self.entities.clear();
    }

    /// Forward iterator over the entities, in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }

    /// Mutable forward iterator, in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entities.iter_mut()
    }

    /// A bidirectional cursor positioned before the first entity.
    pub fn cursor(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            entities: &mut self.entities,
            next: 0,
            last: None,
        }
    }

    /// A bidirectional cursor positioned before `index`.
    ///
    /// # Errors
    /// `EntityError::IndexOutOfBounds` if `index > len` (`index == len` is
    /// valid and positions the cursor after the last entity).
    pub fn cursor_at(&mut self, index: usize) -> Result<CursorMut<'_, T>, EntityError> {
        let len = self.entities.len();
        if index > len {
            return Err(EntityError::IndexOutOfBounds { index, len });
        }
        Ok(CursorMut {
            entities: &mut self.entities,
            next: index,
            last: None,
        })
    }

    /// Stable in-place sort by the caller-supplied total order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.entities.sort_by(compare);
    }

    /// Returns a new sequence holding clones of the entities satisfying
    /// `predicate`, original order preserved.
    pub fn filtered<P>(&self, mut predicate: P) -> EntityVec<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.entities
            .iter()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect()
    }

    /// Returns the transform of every entity, original order preserved. The
    /// result type is unconstrained; it need not be an entity.
    pub fn mapped<R, F>(&self, f: F) -> Vec<R>
    where
        F: FnMut(&T) -> R,
    {
        self.entities.iter().map(f).collect()
    }

    /// Returns the entity at `index` if in range; otherwise invokes
    /// `produce(index)` and, on `Some`, **appends** the produced entity (it is
    /// not inserted at `index`) and returns a reference to it.
    pub fn compute_if_absent<F>(&mut self, index: usize, produce: F) -> Option<&T>
    where
        F: FnOnce(usize) -> Option<T>,
    {
        if index < self.entities.len() {
            return Some(&self.entities[index]);
        }
        let entity = produce(index)?;
        self.entities.push(entity);
        self.entities.last()
    }

    /// If `index` is in range, recomputes the entity there: a `Some` result
    /// replaces it and is returned, a `None` result removes it. Out of range,
    /// returns `None` without invoking `remap`.
    pub fn compute_if_present<F>(&mut self, index: usize, remap: F) -> Option<&T>
    where
        F: FnOnce(usize, &T) -> Option<T>,
    {
        if index >= self.entities.len() {
            return None;
        }
        match remap(index, &self.entities[index]) {
            Some(entity) => {
                self.entities[index] = entity;
                Some(&self.entities[index])
            }
            None => {
                self.entities.remove(index);
                None
            }
        }
    }

    /// Always invokes `remap` with the current entity at `index`, or `None`
    /// when out of range. In range, a `Some` result replaces and a `None`
    /// result removes. Out of range, a `Some` result is **appended** (not
    /// inserted at `index`).
    pub fn compute<F>(&mut self, index: usize, remap: F) -> Option<&T>
    where
        F: FnOnce(usize, Option<&T>) -> Option<T>,
    {
        let result = remap(index, self.entities.get(index));
        if index < self.entities.len() {
            match result {
                Some(entity) => {
                    self.entities[index] = entity;
                    Some(&self.entities[index])
                }
                None => {
                    self.entities.remove(index);
                    None
                }
            }
        } else {
            let entity = result?;
            self.entities.push(entity);
            self.entities.last()
        }
    }

    /// If `index` is in range, stores `remap(current, value)`: `Some` replaces
    /// the entity, `None` removes it. Out of range, `value` is **appended**
    /// without invoking `remap`.
    pub fn merge<F>(&mut self, index: usize, value: T, remap: F) -> Option<&T>
    where
        F: FnOnce(&T, T) -> Option<T>,
    {
        if index < self.entities.len() {
            match remap(&self.entities[index], value) {
                Some(entity) => {
                    self.entities[index] = entity;
                    Some(&self.entities[index])
                }
                None => {
                    self.entities.remove(index);
                    None
                }
            }
        } else {
            self.entities.push(value);
            self.entities.last()
        }
    }
}

/// A bidirectional cursor over an [`EntityVec`], in the style of a list
/// iterator: `next` and `prev` step over entities, and `remove` deletes the
/// entity most recently returned by either.
///
/// The cursor holds an exclusive borrow, so only one can be live at a time;
/// structural mutation of the sequence from anywhere else is ruled out by the
/// borrow checker for the cursor's lifetime.
pub struct CursorMut<'a, T: Entity> {
    entities: &'a mut Vec<T>,
    next: usize,
    last: Option<usize>,
}

impl<T: Entity> CursorMut<'_, T> {
    /// Returns the next entity and advances, or `None` at the end.
    pub fn next(&mut self) -> Option<&T> {
        if self.next >= self.entities.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        self.last = Some(index);
        Some(&self.entities[index])
    }

    /// Returns the previous entity and steps back, or `None` at the start.
    pub fn prev(&mut self) -> Option<&T> {
        if self.next == 0 {
            return None;
        }
        self.next -= 1;
        self.last = Some(self.next);
        Some(&self.entities[self.next])
    }

    pub fn has_next(&self) -> bool {
        self.next < self.entities.len()
    }

    pub fn has_prev(&self) -> bool {
        self.next > 0
    }

    /// The index of the entity a call to `next` would return.
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Removes and returns the entity last returned by `next` or `prev`.
    /// Returns `None` if neither has been called since the last removal.
    pub fn remove(&mut self) -> Option<T> {
        let index = self.last.take()?;
        if index < self.next {
            self.next -= 1;
        }
        Some(self.entities.remove(index))
    }
}

impl<T: Entity> Default for EntityVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity + Debug> Debug for EntityVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entities.fmt(f)
    }
}

impl<T: Entity> From<Vec<T>> for EntityVec<T> {
    /// Wraps an existing `Vec` without copying its elements.
    fn from(entities: Vec<T>) -> Self {
        Self { entities }
    }
}

impl<T: Entity> From<EntityVec<T>> for Vec<T> {
    fn from(value: EntityVec<T>) -> Self {
        value.entities
    }
}

impl<T: Entity> Extend<T> for EntityVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.entities.extend(iter);
    }
}

impl<T: Entity> FromIterator<T> for EntityVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

impl<T: Entity> IntoIterator for EntityVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, T: Entity> IntoIterator for &'a EntityVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl<'a, T: Entity> IntoIterator for &'a mut EntityVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter_mut()
    }
}
