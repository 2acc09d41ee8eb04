use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use gdl_types::TypeError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: TypeError,
    },

    #[error("fetch {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("fetch {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{url} returned an error document: {message}")]
    ErrorDocument { url: String, message: String },

    #[error("no acquisition strategies configured")]
    NoStrategies,

    #[error("all {attempts} acquisition strategies failed; last: {last}")]
    Exhausted {
        attempts: usize,
        #[source]
        last: Box<SourceError>,
    },
}

pub type SourceResult<T> = Result<T, SourceError>;
