use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("\"{}\" no es un directorio válido.", .0.display())]
    InvalidInputDirectory(PathBuf),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Could not replace {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}
impl MergeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MergeError::Io {
            path: path.into(),
            source,
        }
    }
}
