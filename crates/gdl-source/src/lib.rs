//! Document acquisition for the game definition loader.
//!
//! A dataset declares an ordered list of [`Strategy`] values (local file,
//! embedded payload, remote fetch, local cache). The [`SourceResolver`] tries
//! them in order and returns the first document that could be acquired,
//! together with which strategy produced it. Intermediate failures are logged
//! at debug level and discarded; only an exhausted chain is an error.
//!
//! A remote response is not cached by the resolver itself. The caller
//! commits it with [`Resolved::commit_cache`] once the document is known to
//! be usable.

pub mod error;
pub mod fetch;
pub mod resolver;
pub mod strategy;

pub use error::{SourceError, SourceResult};
pub use fetch::{DocumentFetcher, HttpFetcher};
pub use resolver::{PendingCache, Resolved, SourceResolver};
pub use strategy::{Strategy, StrategyKind};
