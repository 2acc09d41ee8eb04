use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Where each dataset is read from.
///
/// Every field has a default, so a config file only needs to name what it
/// overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Local objects document the items dataset is decoded from.
    pub items_path: PathBuf,
    pub objects_path: PathBuf,
    pub tiles_path: PathBuf,
    pub packets_path: PathBuf,
    /// Endpoint returning the `<Chars>` server list.
    pub server_list_url: String,
    /// Where a successful server list response is persisted.
    pub server_cache_path: PathBuf,
    /// Upper bound on the server list request, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            items_path: PathBuf::from("Resources/Objects.xml"),
            objects_path: PathBuf::from("Resources/Objects.xml"),
            tiles_path: PathBuf::from("Resources/Tiles.xml"),
            packets_path: PathBuf::from("Resources/Packets.xml"),
            server_list_url: "https://www.realmofthemadgod.com/char/list".to_string(),
            server_cache_path: PathBuf::from("char_list.xml"),
            fetch_timeout_secs: 10,
        }
    }
}

impl LoaderConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
