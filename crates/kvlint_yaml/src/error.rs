//! Errors produced while parsing documents and resolving field paths.

use std::str::Utf8Error;
use thiserror::Error;
use yaml_rust::ScanError;

/// The document could not be parsed into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("invalid YAML: {0}")]
    Syntax(#[from] ScanError),
}

/// A field path was malformed or did not address any node.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid field path `{path}`: {reason}")]
    Syntax { path: String, reason: &'static str },
    #[error("field path `{0}` does not match any node")]
    NotFound(String),
}

/// Either failure of [`resolve`](crate::resolve).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Path(#[from] PathError),
}
