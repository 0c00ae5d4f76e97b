use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("release request failed: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    #[error("release feed returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("malformed release metadata: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },

    #[error("no release asset name ends with '{suffix}'")]
    AssetNotFound { suffix: String },

    #[error("download stream failed: {source}")]
    Stream {
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
