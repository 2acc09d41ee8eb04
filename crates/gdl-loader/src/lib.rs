//! Concurrent loading of the game definition datasets.
//!
//! [`DataLoader::load`] runs one pipeline per dataset (items, tiles, objects,
//! packets, servers) on its own task. Each pipeline walks its fallback chain,
//! decodes the winning document and publishes an immutable
//! [`KeyedStore`](gdl_store::KeyedStore) into the caller's [`Registry`].
//! Failures stay inside their pipeline and come back as entries in the
//! [`LoadReport`].
//!
//! ```no_run
//! # async fn demo() {
//! use std::sync::Arc;
//! use gdl_loader::{DataLoader, LoaderConfig, Registry};
//!
//! let registry = Arc::new(Registry::new());
//! let report = DataLoader::new(&LoaderConfig::default()).load(&registry).await;
//! if let Some(items) = registry.items() {
//!     println!("{} items, {} errors", items.len(), report.error_count());
//! }
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod embedded;
pub mod error;
pub mod loader;
pub mod registry;
pub mod report;

pub use config::LoaderConfig;
pub use dataset::{DatasetName, DatasetSpec};
pub use error::{ConfigError, ConfigResult, LoadError, LoadStage};
pub use loader::DataLoader;
pub use registry::{ItemStore, ObjectStore, PacketStore, Registry, ServerStore, TileStore};
pub use report::{DatasetSummary, LoadReport};
