use std::fmt::Display;
use std::hash::Hash;

/// A dataset record that can live in a [`KeyedStore`](crate::KeyedStore).
///
/// Every record exposes its short identifier (the primary key) and a
/// human-readable name used for secondary lookups. Names are not required to
/// be unique.
pub trait Record: Send + Sync {
    /// The short identifier type (numeric type code or string).
    type Key: Clone + Eq + Hash + Display + Send + Sync;

    /// The record's unique key.
    fn key(&self) -> &Self::Key;

    /// The record's display name.
    fn name(&self) -> &str;
}
