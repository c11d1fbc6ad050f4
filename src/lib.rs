//! In-memory containers for entity values
//!
//! This crate provides two independent generic containers over an [`Entity`]
//! capability: a value type that exposes a stable, comparable identifier.
//!
//! * [`EntityVec<T>`] is an order-preserving, index-addressable sequence.
//!   Insertion order is significant, duplicates are permitted, and entities
//!   can be looked up by position or by identifier.
//! * [`EntityMap<K, T>`] is an unordered mapping from an opaque key to an
//!   entity, with the standard map algebra (`insert`, `get`, the
//!   `compute`/`merge` family) over a deterministic hash map.
//!
//! Neither container performs I/O or synchronization; both are bare mutable
//! state and callers that share them across threads must lock externally.
//!
//! The error policy is deliberately asymmetric and consistent across both
//! containers: *reads* report absence as data (`Option::None`), while
//! *mutations* that cannot locate their target fail with an [`EntityError`].
//! For example `EntityVec::get` returns `None` out of range, but
//! `EntityVec::set` returns `EntityError::IndexOutOfBounds`, and removing a
//! missing entity or key is `EntityError::NotFound`.

pub mod entity;
pub mod entity_map;
pub mod entity_vec;
pub mod error;
pub mod hashing;
pub mod prelude;

pub use entity::Entity;
pub use entity_map::EntityMap;
pub use entity_vec::{CursorMut, EntityVec};
pub use error::EntityError;
