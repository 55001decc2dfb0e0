use kvlint_yaml::{ParseError, PathError, ResolveError};
use std::io;
use thiserror::Error;

/// A failure which aborted report generation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read `{file}`: {source}")]
    Io { file: String, source: io::Error },
    #[error("failed to parse `{file}`: {source}")]
    Parse { file: String, source: ParseError },
    #[error("failed to locate a field in `{file}`: {source}")]
    Path { file: String, source: PathError },
}

impl Error {
    /// The file being processed when the error occurred.
    pub fn file(&self) -> &str {
        match self {
            Error::Io { file, .. } | Error::Parse { file, .. } | Error::Path { file, .. } => file,
        }
    }

    pub(crate) fn resolve(file: &str, err: ResolveError) -> Self {
        let file = file.to_string();
        match err {
            ResolveError::Parse(source) => Error::Parse { file, source },
            ResolveError::Path(source) => Error::Path { file, source },
        }
    }
}
