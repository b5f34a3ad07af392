//! Small containers shared by the `morph` crates.
//!
//! - [`TypeIdMap`]: per-type tables, used by type info cells and the field cache.
//! - [`hash`]: the pass-through hash state behind [`TypeIdMap`].

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
