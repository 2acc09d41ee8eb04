use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// One way of acquiring a dataset's document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Read a document from disk. Lets operators override shipped data.
    LocalFile(PathBuf),
    /// Parse a payload compiled into the binary.
    Embedded {
        label: &'static str,
        payload: &'static str,
    },
    /// HTTP GET `url`; an accepted body is committed to `cache`.
    RemoteFetch { url: String, cache: Option<PathBuf> },
    /// Read the copy a previous [`Strategy::RemoteFetch`] persisted.
    LocalCache(PathBuf),
}

/// The variant of a [`Strategy`], without its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    LocalFile,
    Embedded,
    RemoteFetch,
    LocalCache,
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::LocalFile(_) => StrategyKind::LocalFile,
            Self::Embedded { .. } => StrategyKind::Embedded,
            Self::RemoteFetch { .. } => StrategyKind::RemoteFetch,
            Self::LocalCache(_) => StrategyKind::LocalCache,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalFile(path) => write!(f, "file {}", path.display()),
            Self::Embedded { label, .. } => write!(f, "embedded {label}"),
            Self::RemoteFetch { url, .. } => write!(f, "remote {url}"),
            Self::LocalCache(path) => write!(f, "cache {}", path.display()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LocalFile => "local-file",
            Self::Embedded => "embedded",
            Self::RemoteFetch => "remote-fetch",
            Self::LocalCache => "local-cache",
        };
        f.write_str(s)
    }
}
