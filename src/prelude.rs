pub use crate::entity::Entity;
pub use crate::entity_map::EntityMap;
pub use crate::entity_vec::{CursorMut, EntityVec};
pub use crate::error::EntityError;
pub use crate::hashing::{HashMap, HashMapExt, HashSet, HashSetExt};
