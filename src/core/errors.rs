use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Fatal: the directory itself could not be opened or read.
    #[error("cannot open directory `{path}`: {source}")]
    DirectoryOpen { path: PathBuf, source: io::Error },
    /// Recoverable: one entry could not be stat'd; the listing continues.
    #[error("cannot stat `{path}`: {source}")]
    Stat { path: PathBuf, source: io::Error },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
