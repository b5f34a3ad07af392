//! Hash states for pre-hashed keys, and a re-export of *hashbrown*.

mod hasher;

pub use hasher::{NoOpHashState, NoOpHasher};

pub use hashbrown;
