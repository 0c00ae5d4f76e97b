use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start '{cmd}': {source}")]
    CommandFailed { cmd: String, source: io::Error },

    #[error("terminal is unavailable: {source}")]
    Terminal {
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
