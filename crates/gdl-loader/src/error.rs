use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::dataset::DatasetName;

/// Where in a dataset pipeline a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStage {
    /// Every acquisition strategy failed.
    ExhaustedChain,
    /// The document was acquired but did not decode into a valid store.
    Decode,
    /// The pipeline task panicked or was cancelled.
    Aborted,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ExhaustedChain => "acquisition",
            Self::Decode => "decode",
            Self::Aborted => "pipeline",
        };
        f.write_str(s)
    }
}

/// One dataset's failure, collected into a [`LoadReport`](crate::LoadReport).
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[error("{dataset}: {stage} failed: {cause}")]
pub struct LoadError {
    pub dataset: DatasetName,
    pub stage: LoadStage,
    pub cause: String,
}

impl LoadError {
    pub fn new(dataset: DatasetName, stage: LoadStage, cause: impl fmt::Display) -> Self {
        Self {
            dataset,
            stage,
            cause: cause.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
