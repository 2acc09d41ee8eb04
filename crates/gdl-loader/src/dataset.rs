use std::fmt;

use serde::Serialize;

use gdl_source::Strategy;

use crate::config::LoaderConfig;
use crate::embedded;

/// The five datasets, in declaration order.
///
/// The derived `Ord` follows declaration order and is what load reports are
/// sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DatasetName {
    Items,
    Tiles,
    Objects,
    Packets,
    Servers,
}

impl DatasetName {
    pub const ALL: [DatasetName; 5] = [
        Self::Items,
        Self::Tiles,
        Self::Objects,
        Self::Packets,
        Self::Servers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Items => "Items",
            Self::Tiles => "Tiles",
            Self::Objects => "Objects",
            Self::Packets => "Packets",
            Self::Servers => "Servers",
        }
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dataset together with its fallback chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetSpec {
    pub dataset: DatasetName,
    pub strategies: Vec<Strategy>,
}

impl DatasetSpec {
    pub fn new(dataset: DatasetName, strategies: Vec<Strategy>) -> Self {
        Self {
            dataset,
            strategies,
        }
    }

    /// The standard chain for `dataset`.
    ///
    /// Static datasets read their local file and fall back to the payload
    /// compiled into the binary. The server list is fetched remotely, cached
    /// on success, and falls back to that cache.
    pub fn for_dataset(dataset: DatasetName, config: &LoaderConfig) -> Self {
        let strategies = match dataset {
            DatasetName::Items => vec![
                Strategy::LocalFile(config.items_path.clone()),
                embedded::objects(),
            ],
            DatasetName::Objects => vec![
                Strategy::LocalFile(config.objects_path.clone()),
                embedded::objects(),
            ],
            DatasetName::Tiles => vec![
                Strategy::LocalFile(config.tiles_path.clone()),
                embedded::tiles(),
            ],
            DatasetName::Packets => vec![
                Strategy::LocalFile(config.packets_path.clone()),
                embedded::packets(),
            ],
            DatasetName::Servers => vec![
                Strategy::RemoteFetch {
                    url: config.server_list_url.clone(),
                    cache: Some(config.server_cache_path.clone()),
                },
                Strategy::LocalCache(config.server_cache_path.clone()),
            ],
        };
        Self::new(dataset, strategies)
    }

    /// Specs for every dataset, in declaration order.
    pub fn all(config: &LoaderConfig) -> Vec<Self> {
        DatasetName::ALL
            .iter()
            .map(|&d| Self::for_dataset(d, config))
            .collect()
    }
}
