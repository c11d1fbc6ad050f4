/*!

The [`Entity`] capability contract consumed by the containers in this crate.

An entity is any value that exposes a stable, comparable identifier. The
containers never construct or destroy entities; they store values the caller
moves in and hand back values or references on request. Identifier equality is
the identifier type's own [`Eq`], and `id()` must return the same identifier
for as long as the value is stored.

```rust
use entity_collections::Entity;

struct Person {
    id: u32,
    name: String,
}

impl Entity for Person {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}
```

*/

use std::fmt::Debug;
use std::hash::Hash;

/// A value with a stable, comparable identifier.
pub trait Entity {
    /// The identifier type. `Hash` is required so identifiers can key an
    /// [`EntityMap`](crate::EntityMap); `Clone` so they can be projected out
    /// of a container without moving the entity.
    type Id: Eq + Hash + Clone + Debug;

    /// Returns this entity's identifier. Must be deterministic for the
    /// lifetime of the stored value.
    fn id(&self) -> Self::Id;
}
