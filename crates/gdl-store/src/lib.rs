//! Immutable keyed lookup tables for the game definition loader.
//!
//! Every dataset GDL loads (items, tiles, objects, packets, servers) is
//! materialized into a [`KeyedStore`]: a read-only table indexed by the
//! record's short identifier, with secondary lookups by name and by
//! predicate.
//!
//! # Design Rules
//!
//! 1. A store is built once, from a fully decoded dataset, and never mutated.
//! 2. Keys are unique; a duplicate key fails the build.
//! 3. Decode order is preserved and defines the tie-break for name and
//!    predicate lookups: the earliest matching record wins.
//! 4. Concurrent reads are always safe (stores are immutable).

pub mod error;
pub mod keyed;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use keyed::KeyedStore;
pub use traits::Record;
