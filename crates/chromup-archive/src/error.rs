use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{path}': {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("entry '{entry}' escapes the extraction root: resolves to '{resolved}'")]
    PathEscape { entry: PathBuf, resolved: PathBuf },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
